use std::fmt;
use std::fmt::Write as _;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

/// Game identifiers are ObjectId-style keys: 24 hex characters.
pub const GAME_ID_LEN: usize = 24;

pub fn is_valid_game_id(value: &str) -> bool {
    value.len() == GAME_ID_LEN && value.chars().all(|ch| ch.is_ascii_hexdigit())
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GameId(String);

impl GameId {
    pub fn parse(value: &str) -> Result<Self, GameIdError> {
        if value.len() != GAME_ID_LEN {
            return Err(GameIdError::InvalidLength {
                expected: GAME_ID_LEN,
                found: value.len(),
            });
        }
        for (index, ch) in value.chars().enumerate() {
            if !ch.is_ascii_hexdigit() {
                return Err(GameIdError::InvalidCharacter { ch, index });
            }
        }
        Ok(Self(value.to_ascii_lowercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl std::str::FromStr for GameId {
    type Err = GameIdError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::parse(value)
    }
}

/// Encodes an arbitrary-precision integer, given as a hex string, into
/// base64. Inverse of [`decode_game_id`]: `decode(encode(x)) == x` for every
/// normalized input (lowercase, no redundant leading zeros). Share links use
/// this shorter form of the game id.
pub fn encode_game_id(hex: &str) -> Result<String, GameIdError> {
    let normalized = normalize_hex(hex)?;
    let padded = if normalized.len() % 2 == 1 {
        format!("0{normalized}")
    } else {
        normalized
    };
    let digits = padded.as_bytes();
    let mut bytes = Vec::with_capacity(digits.len() / 2);
    let mut i = 0;
    while i < digits.len() {
        let high = (digits[i] as char).to_digit(16).unwrap_or(0) as u8;
        let low = (digits[i + 1] as char).to_digit(16).unwrap_or(0) as u8;
        bytes.push(high << 4 | low);
        i += 2;
    }
    Ok(STANDARD.encode(bytes))
}

/// Decodes a base64 game id back into its normalized hex form.
pub fn decode_game_id(b64: &str) -> Result<String, GameIdError> {
    let bytes = STANDARD
        .decode(b64.trim())
        .map_err(|_| GameIdError::InvalidBase64)?;
    if bytes.is_empty() {
        return Err(GameIdError::Empty);
    }
    let mut hex = String::with_capacity(bytes.len() * 2);
    for byte in &bytes {
        let _ = write!(hex, "{byte:02x}");
    }
    normalize_hex(&hex)
}

fn normalize_hex(value: &str) -> Result<String, GameIdError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(GameIdError::Empty);
    }
    for (index, ch) in trimmed.chars().enumerate() {
        if !ch.is_ascii_hexdigit() {
            return Err(GameIdError::InvalidCharacter { ch, index });
        }
    }
    let stripped = trimmed.trim_start_matches('0');
    let body = if stripped.is_empty() { "0" } else { stripped };
    Ok(body.to_ascii_lowercase())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameIdError {
    InvalidLength { expected: usize, found: usize },
    InvalidCharacter { ch: char, index: usize },
    InvalidBase64,
    Empty,
}

impl fmt::Display for GameIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameIdError::InvalidLength { expected, found } => {
                write!(f, "game id must be {expected} chars, got {found}")
            }
            GameIdError::InvalidCharacter { ch, index } => {
                write!(f, "invalid character '{ch}' at position {index}")
            }
            GameIdError::InvalidBase64 => write!(f, "not a base64 value"),
            GameIdError::Empty => write!(f, "empty identifier"),
        }
    }
}

impl std::error::Error for GameIdError {}
