//! Bulk import tests.

use ic_cli::commands::import::import_rows;
use ic_client::AlertLevel;
use ic_sheet::Entity;
use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, ResponseTemplate};

use crate::common::{csv_rows, group, role, user, TestEnv, GROUPS, ROLES, USERS};

#[tokio::test]
async fn test_failed_row_does_not_stop_the_others() -> anyhow::Result<()> {
    let env = TestEnv::new().await;
    Mock::given(method("POST"))
        .and(path(USERS))
        .and(body_partial_json(json!({ "userName": "LDAP/taken" })))
        .respond_with(ResponseTemplate::new(409).set_body_json(json!({
            "detail": "User already exists in the system."
        })))
        .with_priority(1)
        .mount(&env.server)
        .await;
    Mock::given(method("POST"))
        .and(path(USERS))
        .respond_with(ResponseTemplate::new(201).set_body_json(user("new", "new")))
        .mount(&env.server)
        .await;

    let rows = csv_rows(
        "userName,domain,email,firstName,lastName,newPassword,passwordOption\n\
         alice,LDAP,alice@example.com,Alice,A,Secret#1,create-password\n\
         taken,LDAP,,,,,\n\
         ,LDAP,nobody@example.com,,,,\n\
         carol,,carol@example.com,Carol,C,,ask-password\n",
    );

    let client = env.client();
    let report = import_rows(&client, Entity::User, &rows).await;

    let mut created = report.created.clone();
    created.sort();
    assert_eq!(created, ["LDAP/alice", "carol"]);

    assert_eq!(report.failed.len(), 1);
    assert_eq!(report.failed[0].row, 3);
    assert_eq!(report.failed[0].notice.description, "User already exists in the system.");

    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.skipped[0].row, 4);
    assert_eq!(report.total(), 4);

    let bodies = env.bodies("POST", USERS).await;
    assert_eq!(bodies.len(), 3);
    let carol = bodies
        .iter()
        .find(|b| b["userName"] == "carol")
        .expect("carol was sent");
    assert_eq!(
        carol["urn:ietf:params:scim:schemas:extension:enterprise:2.0:User"]["askPassword"],
        "true"
    );
    let alice = bodies
        .iter()
        .find(|b| b["userName"] == "LDAP/alice")
        .expect("alice was sent");
    assert_eq!(alice["password"], "Secret#1");
    assert_eq!(alice["emails"][0]["value"], "alice@example.com");
    Ok(())
}

#[tokio::test]
async fn test_group_import_assigns_roles_and_warns_on_failure() -> anyhow::Result<()> {
    let env = TestEnv::new().await;
    Mock::given(method("POST"))
        .and(path(GROUPS))
        .respond_with(ResponseTemplate::new(201).set_body_json(group("g-1", "LDAP/ops")))
        .expect(1)
        .mount(&env.server)
        .await;
    Mock::given(method("PATCH"))
        .and(path(format!("{ROLES}/r-ok")))
        .respond_with(ResponseTemplate::new(200).set_body_json(role("r-ok", "operator")))
        .expect(1)
        .mount(&env.server)
        .await;
    Mock::given(method("PATCH"))
        .and(path(format!("{ROLES}/r-gone")))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "detail": "Role not found with id: r-gone"
        })))
        .mount(&env.server)
        .await;

    let rows = csv_rows("groupName,domain,roles\nops,LDAP,\"r-ok, r-gone\"\n");

    let client = env.client();
    let report = import_rows(&client, Entity::Group, &rows).await;

    assert_eq!(report.created, ["LDAP/ops"]);
    assert!(report.failed.is_empty());
    assert_eq!(report.warnings.len(), 1);
    assert_eq!(report.warnings[0].level, AlertLevel::Warning);
    assert_eq!(report.warnings[0].description, "Role not found with id: r-gone");

    let patches = env.bodies("PATCH", &format!("{ROLES}/r-ok")).await;
    assert_eq!(patches[0]["Operations"][0]["op"], "add");
    assert_eq!(patches[0]["Operations"][0]["value"]["groups"][0]["value"], "g-1");
    Ok(())
}

#[tokio::test]
async fn test_role_import_from_workbook() -> anyhow::Result<()> {
    let env = TestEnv::new().await;
    Mock::given(method("POST"))
        .and(path(ROLES))
        .respond_with(ResponseTemplate::new(201).set_body_json(role("r-new", "auditor")))
        .expect(2)
        .mount(&env.server)
        .await;

    let dir = tempfile::tempdir()?;
    let file = dir.path().join("roles.csv");
    std::fs::write(&file, "roleName\nauditor\nreviewer\n\n")?;
    let rows = ic_sheet::reader::read_file(&file)?;

    let client = env.client();
    let report = import_rows(&client, Entity::Role, &rows).await;

    assert_eq!(report.created.len(), 2);
    assert!(report.skipped.is_empty());

    let names: Vec<String> = env
        .bodies("POST", ROLES)
        .await
        .iter()
        .map(|b| b["displayName"].as_str().unwrap_or_default().to_string())
        .collect();
    assert!(names.contains(&"auditor".to_string()));
    assert!(names.contains(&"reviewer".to_string()));
    Ok(())
}
