//! Serialization tests for the shared data model.

use learnboard_common::*;

#[test]
fn test_invitation_round_trips_through_camel_case_json() {
    let json = r#"{
        "id": "inv-1",
        "email": "yamada@example.com",
        "status": "accepted",
        "sentAt": "2024-06-15T10:30:00Z",
        "expiresAt": "2024-07-15T10:30:00Z",
        "acceptedAt": "2024-06-16T14:20:00Z"
    }"#;

    let invitation: Invitation = serde_json::from_str(json).unwrap();
    assert_eq!(invitation.status, InvitationStatus::Accepted);
    assert!(invitation.accepted_at.is_some());

    let value = serde_json::to_value(&invitation).unwrap();
    assert_eq!(value["sentAt"], "2024-06-15T10:30:00Z");
    assert_eq!(value["status"], "accepted");
}

#[test]
fn test_current_user_optional_company_fields() {
    let json = r#"{
        "id": "admin-1",
        "email": "admin@example.com",
        "firstName": "Hanako",
        "lastName": "Sato",
        "userType": "company_admin",
        "companyName": "Acme",
        "companyCode": null
    }"#;

    let user: CurrentUser = serde_json::from_str(json).unwrap();
    assert_eq!(user.user_type, UserType::CompanyAdmin);
    assert_eq!(user.company_name.as_deref(), Some("Acme"));
    assert!(user.company_code.is_none());
}

#[test]
fn test_content_type_keys_cover_all_variants() {
    let keys: Vec<&str> = ContentType::ALL.iter().map(ContentType::key).collect();
    assert_eq!(keys, vec!["video", "text", "quiz", "interactive", "other"]);
}

#[test]
fn test_progress_status_snake_case() {
    assert_eq!(
        serde_json::to_string(&ProgressStatus::NotStarted).unwrap(),
        "\"not_started\""
    );
    let status: ProgressStatus = serde_json::from_str("\"completed\"").unwrap();
    assert_eq!(status, ProgressStatus::Completed);
}
