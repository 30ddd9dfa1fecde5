mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::{json, Value};

use common::SUPERADMIN;

#[tokio::test]
async fn signup_prefixes_role_and_is_mutable() -> Result<()> {
    let server = common::ensure_server().await?;
    let name = common::unique_name("signup");

    let user = common::signup(&server, &name, "pw", "USER").await?;

    assert_eq!(user["username"], name.as_str());
    assert_eq!(user["role"], "ROLE_USER");
    assert_eq!(user["isImmutable"], false);
    assert!(user["id"].as_i64().is_some());
    Ok(())
}

#[tokio::test]
async fn immutable_flag_in_body_is_ignored() -> Result<()> {
    let server = common::ensure_server().await?;
    let name = common::unique_name("sneaky");

    let res = reqwest::Client::new()
        .post(server.url("/users"))
        .json(&json!({ "username": name, "password": "pw", "role": "USER", "isImmutable": true }))
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.json::<Value>().await?["isImmutable"], false);
    Ok(())
}

#[tokio::test]
async fn admin_creation_requires_superadmin() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let anon_admin = common::unique_name("anon_admin");
    let res = client
        .post(server.url("/users"))
        .json(&json!({ "username": anon_admin, "password": "pw", "role": "ADMIN" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let admin = common::unique_name("admin");
    let res = client
        .post(server.url("/users"))
        .basic_auth(SUPERADMIN.0, Some(SUPERADMIN.1))
        .json(&json!({ "username": admin, "password": "pw", "role": "ADMIN" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.json::<Value>().await?["role"], "ROLE_ADMIN");

    // A non-super admin may not mint further admins
    let second = common::unique_name("admin2");
    let res = client
        .post(server.url("/users"))
        .basic_auth(&admin, Some("pw"))
        .json(&json!({ "username": second, "password": "pw", "role": "ADMIN" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    Ok(())
}

#[tokio::test]
async fn admin_lists_gets_and_deletes_users() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();
    let name = common::unique_name("doomed");
    let user = common::signup(&server, &name, "pw", "USER").await?;
    let uri = server.url(&format!("/users/{}", user["id"]));

    let res = client
        .get(server.url("/users"))
        .basic_auth(SUPERADMIN.0, Some(SUPERADMIN.1))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let users = res.json::<Vec<Value>>().await?;
    assert!(users.iter().any(|u| u["username"] == name.as_str()));

    let res = client.get(&uri).basic_auth(SUPERADMIN.0, Some(SUPERADMIN.1)).send().await?;
    assert_eq!(res.status(), StatusCode::OK);

    let res = client.delete(&uri).basic_auth(SUPERADMIN.0, Some(SUPERADMIN.1)).send().await?;
    assert_eq!(res.status(), StatusCode::NO_CONTENT);

    let res = client.get(&uri).basic_auth(SUPERADMIN.0, Some(SUPERADMIN.1)).send().await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn superadmin_survives_delete() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let users = client
        .get(server.url("/users"))
        .basic_auth(SUPERADMIN.0, Some(SUPERADMIN.1))
        .send()
        .await?
        .json::<Vec<Value>>()
        .await?;
    let superadmin = users
        .iter()
        .find(|u| u["username"] == SUPERADMIN.0)
        .expect("superadmin is seeded");
    assert_eq!(superadmin["isImmutable"], true);

    let res = client
        .delete(server.url(&format!("/users/{}", superadmin["id"])))
        .basic_auth(SUPERADMIN.0, Some(SUPERADMIN.1))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(res.json::<Value>().await?["details"], "Cannot delete superadmin");
    Ok(())
}
