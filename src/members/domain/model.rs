use std::fmt;
use std::fmt::{Display, Formatter};
use serde::{Deserialize, Serialize};
use crate::core::domain::Identifiable;
use crate::core::repository::LineCodec;
use crate::utils::text::{decode_fields, escape, join_fields};

// MemberEntity abstracts library member.
// Record layout: member_id|name|contact
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct MemberEntity {
    pub member_id: String,
    pub name: String,
    pub contact: String,
}

impl MemberEntity {
    pub fn new(member_id: &str, name: &str, contact: &str) -> Self {
        Self {
            member_id: member_id.to_string(),
            name: name.to_string(),
            contact: contact.to_string(),
        }
    }
}

impl Identifiable for MemberEntity {
    fn id(&self) -> &str {
        self.member_id.as_str()
    }
}

impl LineCodec for MemberEntity {
    const MIN_FIELDS: usize = 3;

    fn encode(&self) -> String {
        join_fields(&[
            escape(&self.member_id),
            escape(&self.name),
            escape(&self.contact),
        ])
    }

    fn decode(line: &str) -> Option<Self> {
        let fields = decode_fields(line, Self::MIN_FIELDS)?;
        Some(MemberEntity::new(&fields[0], &fields[1], &fields[2]))
    }
}

impl Display for MemberEntity {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "ID: {}, Name: {}, Contact: {}", self.member_id, self.name, self.contact)
    }
}

#[cfg(test)]
mod tests {
    use crate::core::repository::LineCodec;
    use crate::members::domain::model::MemberEntity;

    #[test]
    fn test_should_build_member() {
        let member = MemberEntity::new("m1", "Alice", "a@x.com");
        assert_eq!("m1", member.member_id.as_str());
        assert_eq!("Alice", member.name.as_str());
        assert_eq!("a@x.com", member.contact.as_str());
    }

    #[test]
    fn test_should_round_trip_member() {
        let member = MemberEntity::new("m\\1", "Alice | Bob", "");
        assert_eq!("m\\\\1|Alice \\| Bob|", member.encode());
        assert_eq!(Some(member.clone()), MemberEntity::decode(member.encode().as_str()));
    }

    #[test]
    fn test_should_skip_short_line() {
        assert_eq!(None, MemberEntity::decode("m1|Alice"));
        assert_eq!(None, MemberEntity::decode(""));
    }

    #[test]
    fn test_should_format_member() {
        let member = MemberEntity::new("m1", "Alice", "a@x.com");
        assert_eq!("ID: m1, Name: Alice, Contact: a@x.com", member.to_string());
    }
}
