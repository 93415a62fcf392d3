//! Wire type tags for the Sandesh binary protocol
//!
//! `WireType` is the one-byte discriminator written ahead of every field
//! and container element. `MessageKind` classifies the legacy RPC message
//! envelope.

/// One-byte tag identifying how the next value on the wire is encoded
///
/// NOTE: These values are wire-format constants shared with every peer
/// runtime and must never be renumbered. A writer and reader that disagree
/// on a tag number corrupt the stream silently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum WireType {
    /// Sentinel terminating a field sequence (not a value type)
    Stop = 0,
    Void = 1,
    Bool = 2,
    Byte = 3,
    Double = 4,
    I16 = 6,
    I32 = 8,
    U64 = 9,
    I64 = 10,
    /// Length-prefixed byte string (also used for binary payloads)
    String = 11,
    Struct = 12,
    Map = 13,
    Set = 14,
    List = 15,
    Utf8 = 16,
    Utf16 = 17,
    /// Named self-describing record (struct with record-name framing)
    Sandesh = 18,
    U16 = 19,
    U32 = 20,
    /// XML document carried with string framing
    Xml = 21,
    Ipv4 = 22,
    Uuid = 23,
    IpAddr = 24,
}

impl WireType {
    /// Parse a wire type from its tag byte
    #[inline]
    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::Stop),
            1 => Some(Self::Void),
            2 => Some(Self::Bool),
            3 => Some(Self::Byte),
            4 => Some(Self::Double),
            6 => Some(Self::I16),
            8 => Some(Self::I32),
            9 => Some(Self::U64),
            10 => Some(Self::I64),
            11 => Some(Self::String),
            12 => Some(Self::Struct),
            13 => Some(Self::Map),
            14 => Some(Self::Set),
            15 => Some(Self::List),
            16 => Some(Self::Utf8),
            17 => Some(Self::Utf16),
            18 => Some(Self::Sandesh),
            19 => Some(Self::U16),
            20 => Some(Self::U32),
            21 => Some(Self::Xml),
            22 => Some(Self::Ipv4),
            23 => Some(Self::Uuid),
            24 => Some(Self::IpAddr),
            _ => None,
        }
    }

    /// Convert to the tag byte written on the wire
    #[inline]
    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    /// Check if this type opens a container header (map/list/set)
    #[inline]
    pub const fn is_container(self) -> bool {
        matches!(self, Self::Map | Self::Set | Self::List)
    }

    /// Get the string name of this wire type
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Stop => "stop",
            Self::Void => "void",
            Self::Bool => "bool",
            Self::Byte => "byte",
            Self::Double => "double",
            Self::I16 => "i16",
            Self::I32 => "i32",
            Self::U64 => "u64",
            Self::I64 => "i64",
            Self::String => "string",
            Self::Struct => "struct",
            Self::Map => "map",
            Self::Set => "set",
            Self::List => "list",
            Self::Utf8 => "utf8",
            Self::Utf16 => "utf16",
            Self::Sandesh => "sandesh",
            Self::U16 => "u16",
            Self::U32 => "u32",
            Self::Xml => "xml",
            Self::Ipv4 => "ipv4",
            Self::Uuid => "uuid",
            Self::IpAddr => "ipaddr",
        }
    }
}

impl std::fmt::Display for WireType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Message classification for the legacy RPC envelope
///
/// Only used by message begin/end framing (version word low byte); the
/// sandesh record envelope does not carry one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum MessageKind {
    Call = 1,
    Reply = 2,
    Exception = 3,
    Oneway = 4,
}

impl MessageKind {
    /// Parse a message kind from the version word's low byte
    #[inline]
    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            1 => Some(Self::Call),
            2 => Some(Self::Reply),
            3 => Some(Self::Exception),
            4 => Some(Self::Oneway),
            _ => None,
        }
    }

    /// Convert to the wire byte value
    #[inline]
    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    /// Get the string name of this message kind
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Call => "call",
            Self::Reply => "reply",
            Self::Exception => "exception",
            Self::Oneway => "oneway",
        }
    }
}

impl std::fmt::Display for MessageKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
