//! Pingback 1.0 fault taxonomy.
//!
//! The receiver pipeline returns `Result<String, PingbackFault>`; the XML-RPC
//! boundary re-encodes it to the wire format remote clients expect (a string
//! on success, a bare integer code on failure). The codes are the protocol's
//! contract and must not be translated.

/// Terminal outcomes of the pingback verification pipeline, with their fixed
/// wire codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PingbackFault {
    /// Generic fault, also the catch-all for unexpected internal errors.
    Undefined,
    /// The source URI could not be fetched.
    SourceDoesNotExist,
    /// The fetched source document does not contain the target URI.
    SourceDoesNotLink,
    /// The target URI does not resolve to an entry on this site.
    TargetDoesNotExist,
    /// The target entry exists but does not accept pingbacks.
    TargetIsNotPingable,
    /// A pingback for this (source, target) pair is already registered.
    AlreadyRegistered,
    /// The configured spam checker flagged the pingback.
    Spam,
}

impl PingbackFault {
    /// The numeric code sent on the wire.
    pub fn code(&self) -> i32 {
        match self {
            PingbackFault::Undefined => 0,
            PingbackFault::SourceDoesNotExist => 16,
            PingbackFault::SourceDoesNotLink => 17,
            PingbackFault::TargetDoesNotExist => 32,
            PingbackFault::TargetIsNotPingable => 33,
            PingbackFault::AlreadyRegistered => 48,
            PingbackFault::Spam => 51,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_codes_are_fixed() {
        assert_eq!(PingbackFault::Undefined.code(), 0);
        assert_eq!(PingbackFault::SourceDoesNotExist.code(), 16);
        assert_eq!(PingbackFault::SourceDoesNotLink.code(), 17);
        assert_eq!(PingbackFault::TargetDoesNotExist.code(), 32);
        assert_eq!(PingbackFault::TargetIsNotPingable.code(), 33);
        assert_eq!(PingbackFault::AlreadyRegistered.code(), 48);
        assert_eq!(PingbackFault::Spam.code(), 51);
    }
}
