use mgate_domain::constants::{
    APPLICATION_JSON, APPLICATION_XML, DEFAULT_GROUP, JSON, SERIALIZATION_GROUPS, XML,
};

#[test]
fn constants_match_wire_strings() {
    assert_eq!(APPLICATION_JSON, "application/json");
    assert_eq!(APPLICATION_XML, "application/xml");
    assert_eq!(JSON, "json");
    assert_eq!(XML, "xml");
    assert_eq!(SERIALIZATION_GROUPS, "serialization_groups");
    assert_eq!(DEFAULT_GROUP, "Default");
}
