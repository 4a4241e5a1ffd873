//! Token kinds and token records.
//!
//! The kind enumeration is shared between the lexer (which produces tokens),
//! the grammar compiler (which resolves upper-case token references and
//! operator literals to kinds) and the parser (which classifies tokens into
//! grammar labels).

use std::fmt;
use std::sync::Arc;

use serde::{Serialize, Serializer};

macro_rules! token_kinds {
    ($($variant:ident => $name:literal),* $(,)?) => {
        /// Lexical token kind.
        ///
        /// Discriminants are stable and always below 256, so a kind can be
        /// used directly wherever the parser tables expect a terminal id.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #[repr(u8)]
        pub enum TokenKind {
            $($variant),*
        }

        impl TokenKind {
            /// Every kind, in discriminant order.
            pub const ALL: &'static [TokenKind] = &[$(TokenKind::$variant),*];

            /// Upper-case name used in grammar sources and dumps.
            pub fn name(self) -> &'static str {
                match self {
                    $(TokenKind::$variant => $name),*
                }
            }
        }
    };
}

token_kinds! {
    EndMarker => "ENDMARKER",
    Name => "NAME",
    Number => "NUMBER",
    String => "STRING",
    Newline => "NEWLINE",
    Indent => "INDENT",
    Dedent => "DEDENT",
    LPar => "LPAR",
    RPar => "RPAR",
    LSqb => "LSQB",
    RSqb => "RSQB",
    Colon => "COLON",
    Comma => "COMMA",
    Semi => "SEMI",
    Plus => "PLUS",
    Minus => "MINUS",
    Star => "STAR",
    Slash => "SLASH",
    VBar => "VBAR",
    Amper => "AMPER",
    Less => "LESS",
    Greater => "GREATER",
    Equal => "EQUAL",
    Dot => "DOT",
    Percent => "PERCENT",
    Backquote => "BACKQUOTE",
    LBrace => "LBRACE",
    RBrace => "RBRACE",
    EqEqual => "EQEQUAL",
    NotEqual => "NOTEQUAL",
    LessEqual => "LESSEQUAL",
    GreaterEqual => "GREATEREQUAL",
    Tilde => "TILDE",
    Circumflex => "CIRCUMFLEX",
    LeftShift => "LEFTSHIFT",
    RightShift => "RIGHTSHIFT",
    DoubleStar => "DOUBLESTAR",
    PlusEqual => "PLUSEQUAL",
    MinEqual => "MINEQUAL",
    StarEqual => "STAREQUAL",
    SlashEqual => "SLASHEQUAL",
    PercentEqual => "PERCENTEQUAL",
    AmperEqual => "AMPEREQUAL",
    VBarEqual => "VBAREQUAL",
    CircumflexEqual => "CIRCUMFLEXEQUAL",
    LeftShiftEqual => "LEFTSHIFTEQUAL",
    RightShiftEqual => "RIGHTSHIFTEQUAL",
    DoubleStarEqual => "DOUBLESTAREQUAL",
    DoubleSlash => "DOUBLESLASH",
    DoubleSlashEqual => "DOUBLESLASHEQUAL",
    At => "AT",
    Op => "OP",
    ErrorToken => "ERRORTOKEN",
    Comment => "COMMENT",
    Nl => "NL",
    FakeSuiteStart => "FAKESUITESTART",
    FakeSuite => "FAKESUITE",
}

/// Operator spellings recognized by the lexer, with their kinds.
pub const OPERATORS: &[(&str, TokenKind)] = &[
    ("(", TokenKind::LPar),
    (")", TokenKind::RPar),
    ("[", TokenKind::LSqb),
    ("]", TokenKind::RSqb),
    (":", TokenKind::Colon),
    (",", TokenKind::Comma),
    (";", TokenKind::Semi),
    ("+", TokenKind::Plus),
    ("-", TokenKind::Minus),
    ("*", TokenKind::Star),
    ("/", TokenKind::Slash),
    ("|", TokenKind::VBar),
    ("&", TokenKind::Amper),
    ("<", TokenKind::Less),
    (">", TokenKind::Greater),
    ("=", TokenKind::Equal),
    (".", TokenKind::Dot),
    ("%", TokenKind::Percent),
    ("`", TokenKind::Backquote),
    ("{", TokenKind::LBrace),
    ("}", TokenKind::RBrace),
    ("==", TokenKind::EqEqual),
    ("!=", TokenKind::NotEqual),
    ("<>", TokenKind::NotEqual),
    ("<=", TokenKind::LessEqual),
    (">=", TokenKind::GreaterEqual),
    ("~", TokenKind::Tilde),
    ("^", TokenKind::Circumflex),
    ("<<", TokenKind::LeftShift),
    (">>", TokenKind::RightShift),
    ("**", TokenKind::DoubleStar),
    ("+=", TokenKind::PlusEqual),
    ("-=", TokenKind::MinEqual),
    ("*=", TokenKind::StarEqual),
    ("/=", TokenKind::SlashEqual),
    ("%=", TokenKind::PercentEqual),
    ("&=", TokenKind::AmperEqual),
    ("|=", TokenKind::VBarEqual),
    ("^=", TokenKind::CircumflexEqual),
    ("<<=", TokenKind::LeftShiftEqual),
    (">>=", TokenKind::RightShiftEqual),
    ("**=", TokenKind::DoubleStarEqual),
    ("//", TokenKind::DoubleSlash),
    ("//=", TokenKind::DoubleSlashEqual),
    ("@", TokenKind::At),
];

impl TokenKind {
    /// Numeric id, as stored in label and token tables.
    #[inline]
    pub fn id(self) -> u8 {
        self as u8
    }

    /// Look up a kind by its upper-case grammar name (`NAME`, `INDENT`, ...).
    pub fn from_name(name: &str) -> Option<TokenKind> {
        Self::ALL.iter().copied().find(|kind| kind.name() == name)
    }

    /// Look up the kind of an operator spelling.
    pub fn from_operator(text: &[u8]) -> Option<TokenKind> {
        OPERATORS
            .iter()
            .find(|(op, _)| op.as_bytes() == text)
            .map(|&(_, kind)| kind)
    }

    /// Kinds the lexer never produces; they exist only as recovery insertions.
    pub fn is_recovery_only(self) -> bool {
        matches!(self, TokenKind::FakeSuiteStart | TokenKind::FakeSuite)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for TokenKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

/// A lexed token.
///
/// Line numbers are 1-based, columns are 0-based byte offsets into the
/// physical line. Tokens synthesized by the repair search carry line 0.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
    pub line: u32,
    pub column: u32,
    /// Full text of the physical line the token was found on.
    #[serde(skip)]
    pub source_line: Arc<str>,
}

impl Token {
    #[inline]
    pub fn new(
        kind: TokenKind,
        value: impl Into<String>,
        line: u32,
        column: u32,
        source_line: Arc<str>,
    ) -> Self {
        Self {
            kind,
            value: value.into(),
            line,
            column,
            source_line,
        }
    }

    /// A token invented by the repair search rather than read from source.
    pub fn synthetic(kind: TokenKind, value: impl Into<String>) -> Self {
        Self::new(kind, value, 0, 0, Arc::from(""))
    }

    pub fn is_synthetic(&self) -> bool {
        self.line == 0
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.value.is_empty() {
            write!(f, "{}", self.kind)
        } else {
            write!(f, "{} {:?}", self.kind, self.value)
        }
    }
}
