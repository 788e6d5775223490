use crate::error::ConfigError;
use crate::fields::{FieldDecl, TypeIdent};

/// Separates the key from the flag characters in an annotation.
const FLAG_SEPARATOR: char = ',';
/// Omit the field while it holds a zero value.
const FLAG_CONDITIONAL: char = 'c';

/// The key and flags an annotation resolves to.
#[derive(Debug, PartialEq, Eq)]
pub(super) struct ParsedTag {
    pub key: String,
    pub conditional: bool,
}

/// Resolves the serialized key and flags of `decl`.
pub(super) fn parse(decl: &FieldDecl, owner: TypeIdent) -> Result<ParsedTag, ConfigError> {
    let mut conditional = false;
    let mut key = decl.tag().unwrap_or_default();

    if let Some((head, flags)) = key.rsplit_once(FLAG_SEPARATOR) {
        for flag in flags.chars() {
            match flag {
                FLAG_CONDITIONAL => conditional = true,
                _ => {
                    return Err(ConfigError::UnsupportedFlag {
                        flag,
                        field: decl.name().to_owned(),
                        owner,
                    });
                }
            }
        }
        key = head;
    }

    let key = if key.is_empty() {
        decl.name().to_lowercase()
    } else {
        key.to_owned()
    };

    Ok(ParsedTag { key, conditional })
}

#[cfg(test)]
mod tests {
    use super::{ParsedTag, parse};
    use crate::ConfigError;
    use crate::fields::{FieldDecl, TypeIdent};

    const OWNER: TypeIdent = TypeIdent::new("tests", "Owner");

    fn parsed(name: &'static str, tag: Option<&'static str>) -> Result<ParsedTag, ConfigError> {
        parse(&FieldDecl::new(name, tag, true), OWNER)
    }

    #[test]
    fn key_defaults_to_lowercase_name() {
        let tag = parsed("MaxRetries", None).unwrap();
        assert_eq!(tag.key, "maxretries");
        assert!(!tag.conditional);
    }

    #[test]
    fn explicit_key_and_flag() {
        assert_eq!(
            parsed("Y", Some("y,c")).unwrap(),
            ParsedTag {
                key: "y".into(),
                conditional: true
            }
        );
        assert_eq!(parsed("Y", Some("why")).unwrap().key, "why");
    }

    #[test]
    fn flag_without_key_uses_name() {
        let tag = parsed("Count", Some(",c")).unwrap();
        assert_eq!(tag.key, "count");
        assert!(tag.conditional);
    }

    #[test]
    fn empty_flag_segment() {
        let tag = parsed("a", Some("alpha,")).unwrap();
        assert_eq!(tag.key, "alpha");
        assert!(!tag.conditional);
    }

    #[test]
    fn last_separator_splits() {
        let tag = parsed("a", Some("a,b,c")).unwrap();
        assert_eq!(tag.key, "a,b");
        assert!(tag.conditional);
    }

    #[test]
    fn unknown_flag_is_rejected() {
        let err = parsed("Name", Some("name,cx")).unwrap_err();
        assert_eq!(
            err,
            ConfigError::UnsupportedFlag {
                flag: 'x',
                field: "Name".into(),
                owner: OWNER,
            }
        );
    }
}
