//! Tests for board identifiers, credentials, models and request payloads.

use crate::board::{
    domain::{
        BoardCredentials, BoardDomainError, CardId, CardUpdate, CheckItemPosition, Label,
        LabelId, ListId, NewCard, NewCheckItem,
    },
    ports::BoardServiceError,
};
use rstest::{fixture, rstest};

#[fixture]
fn list_id() -> ListId {
    ListId::new("list-todo").expect("valid list id")
}

fn param<'a>(params: &'a [(String, String)], key: &str) -> Option<&'a str> {
    params
        .iter()
        .find(|(name, _)| name == key)
        .map(|(_, value)| value.as_str())
}

#[rstest]
fn identifiers_are_trimmed() {
    let card_id = CardId::new("  5f0c1a  ").expect("valid card id");
    assert_eq!(card_id.as_str(), "5f0c1a");
}

#[rstest]
#[case("")]
#[case("   ")]
fn identifiers_reject_blank_values(#[case] raw: &str) {
    assert_eq!(
        CardId::new(raw),
        Err(BoardDomainError::EmptyIdentifier { kind: "card" })
    );
}

#[rstest]
#[case("abc def")]
#[case("abc/def")]
#[case("abc?x=1")]
#[case("abc#frag")]
fn identifiers_reject_path_delimiters(#[case] raw: &str) {
    assert_eq!(
        ListId::new(raw),
        Err(BoardDomainError::InvalidIdentifier {
            kind: "list",
            value: raw.to_owned(),
        })
    );
}

#[rstest]
fn identifiers_deserialize_through_validation() {
    let parsed: Result<CardId, _> = serde_json::from_str("\"a/b\"");
    assert!(parsed.is_err(), "invalid id should not deserialize");
    let valid: CardId = serde_json::from_str("\"abc\"").expect("valid id deserializes");
    assert_eq!(valid.as_str(), "abc");
}

#[rstest]
fn credentials_reject_blank_parts() {
    assert_eq!(
        BoardCredentials::new(" ", "token"),
        Err(BoardDomainError::EmptyApiKey)
    );
    assert_eq!(
        BoardCredentials::new("key", ""),
        Err(BoardDomainError::EmptyApiToken)
    );
}

#[rstest]
fn credentials_debug_hides_token() {
    let credentials = BoardCredentials::new("key-1", "secret-token").expect("valid credentials");
    let rendered = format!("{credentials:?}");
    assert!(rendered.contains("key-1"));
    assert!(!rendered.contains("secret-token"));
}

#[rstest]
#[case(Some("Urgent"), Some("red"), "Urgent (red)")]
#[case(Some("Urgent"), None, "Urgent")]
#[case(None, Some("green"), "green")]
#[case(Some("Urgent"), Some(""), "Urgent")]
fn label_display_name_combines_name_and_color(
    #[case] name: Option<&str>,
    #[case] color: Option<&str>,
    #[case] expected: &str,
) {
    let label = Label {
        id: LabelId::new("label-1").expect("valid label id"),
        name: name.unwrap_or_default().to_owned(),
        color: color.map(str::to_owned),
    };
    assert_eq!(label.display_name(), expected);
}

#[rstest]
fn new_card_params_carry_core_fields_and_labels(list_id: ListId) {
    let labels = ["l1", "l2"].map(|raw| LabelId::new(raw).expect("valid label id"));
    let card = NewCard::new(list_id, "Review draft")
        .with_desc("https://example.test/draft")
        .with_labels(labels)
        .with_extra("pos", "top");

    let params = card.to_params();

    assert_eq!(param(&params, "name"), Some("Review draft"));
    assert_eq!(param(&params, "desc"), Some("https://example.test/draft"));
    assert_eq!(param(&params, "idList"), Some("list-todo"));
    assert_eq!(param(&params, "idLabels"), Some("l1,l2"));
    assert_eq!(param(&params, "pos"), Some("top"));
}

#[rstest]
fn new_card_core_fields_override_extra_fields(list_id: ListId) {
    let card = NewCard::new(list_id, "Title").with_extra("name", "Shadowed");
    let params = card.to_params();
    assert_eq!(param(&params, "name"), Some("Title"));
    assert_eq!(params.iter().filter(|(key, _)| key == "name").count(), 1);
}

#[rstest]
fn new_card_without_labels_omits_label_parameter(list_id: ListId) {
    let params = NewCard::new(list_id, "Title").to_params();
    assert_eq!(param(&params, "idLabels"), None);
}

#[rstest]
fn card_update_skips_blank_text_fields() {
    let update = CardUpdate::new().with_name("  ").with_desc("");
    assert!(update.is_empty());
    assert!(update.to_params().is_empty());
}

#[rstest]
fn card_update_renders_only_set_fields(list_id: ListId) {
    let update = CardUpdate::new().with_list(list_id).with_closed(true);
    let params = update.to_params();
    assert_eq!(param(&params, "idList"), Some("list-todo"));
    assert_eq!(param(&params, "closed"), Some("true"));
    assert_eq!(param(&params, "name"), None);
    assert_eq!(params.len(), 2);
}

#[rstest]
#[case(CheckItemPosition::Top, "top")]
#[case(CheckItemPosition::Bottom, "bottom")]
#[case(CheckItemPosition::At(3), "3")]
fn check_item_position_params(#[case] position: CheckItemPosition, #[case] expected: &str) {
    assert_eq!(position.as_param(), expected);
}

#[rstest]
fn new_check_item_defaults_to_unchecked_bottom() {
    let params = NewCheckItem::new("Proofread").to_params();
    assert_eq!(param(&params, "name"), Some("Proofread"));
    assert_eq!(param(&params, "checked"), Some("false"));
    assert_eq!(param(&params, "pos"), Some("bottom"));
}

#[rstest]
fn unauthorized_status_is_classified_separately() {
    let error = BoardServiceError::from_status("create_card", 401, "invalid token");
    assert!(matches!(
        error,
        BoardServiceError::Unauthorized { status: 401, .. }
    ));
    assert_eq!(error.status(), Some(401));
    assert_eq!(error.operation(), "create_card");
}

#[rstest]
#[case(400)]
#[case(404)]
#[case(500)]
fn other_statuses_are_rejections(#[case] status: u16) {
    let error = BoardServiceError::from_status("update_card", status, "boom");
    assert!(matches!(error, BoardServiceError::Rejected { .. }));
    assert_eq!(error.status(), Some(status));
}

#[rstest]
fn transport_errors_have_no_status() {
    let error = BoardServiceError::transport("list_boards", std::io::Error::other("refused"));
    assert_eq!(error.status(), None);
    assert!(error.to_string().contains("refused"));
}
