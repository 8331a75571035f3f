//! Export tests.

use chrono::FixedOffset;
use ic_cli::commands::export::build_export;
use ic_cli::CliError;
use ic_sheet::reader::{read_bytes, SourceFormat};
use ic_sheet::{Entity, OutputKind};
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

use crate::common::{group, list_response, role, user, users, TestEnv, GROUPS, ROLES, USERS};

const MILLIS: i64 = 1_717_000_000_000;

fn utc() -> FixedOffset {
    FixedOffset::east_opt(0).expect("offset")
}

#[tokio::test]
async fn test_user_export_keeps_every_userstore() -> anyhow::Result<()> {
    let env = TestEnv::new().await;
    let mut resources = users(2);
    resources.push(user("c-1", "CONSUMER/alice"));
    Mock::given(method("GET"))
        .and(path(USERS))
        .and(query_param("count", "1001"))
        .and(query_param("startIndex", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(list_response(resources)))
        .expect(1)
        .mount(&env.server)
        .await;

    let client = env.client();
    let export = build_export(&client, Entity::User, OutputKind::Csv, utc(), None, MILLIS).await?;

    assert_eq!(export.name, "list_user_1717000000000.csv");
    assert_eq!(export.rows, 3);

    let rows = read_bytes(&export.bytes, SourceFormat::Csv)?;
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0].get("number"), "1");
    assert_eq!(rows[0].get("email"), "u-1@example.com");
    assert_eq!(rows[0].get("created"), "01/03/2024 08:30:00");
    assert_eq!(rows[2].get("userName"), "CONSUMER/alice");
    Ok(())
}

#[tokio::test]
async fn test_user_export_stops_at_the_limit() -> anyhow::Result<()> {
    let env = TestEnv::new().await;
    env.mock_get(USERS, list_response(users(1001))).await;

    let client = env.client();
    let export = build_export(&client, Entity::User, OutputKind::Csv, utc(), None, MILLIS).await?;
    assert_eq!(export.rows, 1000);
    Ok(())
}

#[tokio::test]
async fn test_group_export_joins_members_into_workbook() -> anyhow::Result<()> {
    let env = TestEnv::new().await;
    let mut ops = group("g-1", "ops");
    ops["members"] = json!([{ "value": "u-1", "display": "alice" }, { "value": "u-2", "display": "bob" }]);
    env.mock_get(GROUPS, list_response(vec![ops, group("g-2", "Internal/system")]))
        .await;

    let client = env.client();
    let export = build_export(&client, Entity::Group, OutputKind::Xlsx, utc(), None, MILLIS).await?;

    assert_eq!(export.name, "list_group_1717000000000.xlsx");
    let rows = read_bytes(&export.bytes, SourceFormat::Workbook)?;
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].get("displayName"), "ops");
    assert_eq!(rows[0].get("members"), "alice,bob");
    assert_eq!(rows[1].get("members"), "");
    Ok(())
}

#[tokio::test]
async fn test_role_export_reads_each_role_in_detail() -> anyhow::Result<()> {
    let env = TestEnv::new().await;
    env.mock_get(ROLES, list_response(vec![role("r-1", "admin"), role("r-2", "auditor")]))
        .await;

    let mut admin = role("r-1", "admin");
    admin["groups"] = json!([{ "value": "g-1", "display": "ops" }]);
    admin["users"] = json!([{ "value": "u-1", "display": "alice" }, { "value": "u-2", "display": "bob" }]);
    env.mock_get(&format!("{ROLES}/r-1"), admin).await;
    env.mock_get(&format!("{ROLES}/r-2"), role("r-2", "auditor")).await;

    let client = env.client();
    let export = build_export(&client, Entity::Role, OutputKind::Csv, utc(), None, MILLIS).await?;

    let rows = read_bytes(&export.bytes, SourceFormat::Csv)?;
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].get("group"), "ops");
    assert_eq!(rows[0].get("user"), "alice,bob");
    assert_eq!(rows[1].get("displayName"), "auditor");
    assert_eq!(rows[1].get("user"), "");
    Ok(())
}

#[tokio::test]
async fn test_role_export_fails_when_a_detail_fails() -> anyhow::Result<()> {
    let env = TestEnv::new().await;
    env.mock_get(ROLES, list_response(vec![role("r-1", "admin"), role("r-2", "auditor")]))
        .await;
    env.mock_get(&format!("{ROLES}/r-1"), role("r-1", "admin")).await;
    Mock::given(method("GET"))
        .and(path(format!("{ROLES}/r-2")))
        .respond_with(ResponseTemplate::new(500))
        .mount(&env.server)
        .await;

    let client = env.client();
    let result = build_export(&client, Entity::Role, OutputKind::Csv, utc(), None, MILLIS).await;

    match result {
        Err(CliError::Notice(notice)) => assert_eq!(notice.message, "Error while exporting records"),
        other => panic!("expected a notice, got {other:?}"),
    }
    Ok(())
}
