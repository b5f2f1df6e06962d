//! Error code definitions for every diagnostic that the checker can emit.
//! Each code has a stable number, which is printed in reports, and the
//! diagnostic key that javac uses for the same condition.

macro_rules! error_codes {
    ($($name:ident = $code:expr => $key:literal,)*) => {
        /// All error codes that can be reported.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum JpatErrorCode {
            $($name = $code,)*
        }

        impl JpatErrorCode {
            /// All of the defined error codes, in order of their number.
            pub const ALL: &'static [JpatErrorCode] = &[$(JpatErrorCode::$name,)*];

            /// Get the number of the error code.
            pub fn to_num(&self) -> u32 {
                *self as u32
            }

            /// Get the diagnostic key of the error code, e.g. `not.exhaustive`.
            pub fn key(&self) -> &'static str {
                match self {
                    $(JpatErrorCode::$name => $key,)*
                }
            }

            /// Look up an error code by its diagnostic key.
            pub fn from_key(key: &str) -> Option<Self> {
                match key {
                    $($key => Some(JpatErrorCode::$name),)*
                    _ => None,
                }
            }
        }
    };
}

mod error_codes;
pub use error_codes::JpatErrorCode;

#[cfg(test)]
mod test_super {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_error_codes_are_unique() {
        let nums: HashSet<_> = JpatErrorCode::ALL.iter().map(|code| code.to_num()).collect();
        let keys: HashSet<_> = JpatErrorCode::ALL.iter().map(|code| code.key()).collect();

        assert_eq!(nums.len(), JpatErrorCode::ALL.len());
        assert_eq!(keys.len(), JpatErrorCode::ALL.len());
    }

    #[test]
    fn test_error_code_keys() {
        assert_eq!(JpatErrorCode::NotExhaustive.key(), "not.exhaustive");
        assert_eq!(JpatErrorCode::from_key("pattern.dominated"), Some(JpatErrorCode::PatternDominated));
        assert_eq!(JpatErrorCode::from_key("no.such.key"), None);
    }
}
