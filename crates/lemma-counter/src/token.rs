use std::fmt;

use serde_json::Value;
use thiserror::Error;
use ud_corpus::RawToken;
use upos_types::Upos;

/// Token fields that carry a validation rule.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Field {
    Text,
    Lemma,
    Pos,
    Feats,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Field::Text => "text",
            Field::Lemma => "lemma",
            Field::Pos => "pos",
            Field::Feats => "feats",
        })
    }
}

#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum TokenError {
    #[error("{0} is missing")]
    Missing(Field),
    #[error("{0} cannot be empty")]
    Empty(Field),
    #[error("{0} must be a string")]
    WrongType(Field),
    #[error("pos must be a universal part-of-speech tag, got {0:?}")]
    UnknownPos(String),
}

/// A token record that passed validation.
///
/// `lemma` is stored trimmed; `text` is kept verbatim.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Token {
    text: String,
    lemma: String,
    pos: Upos,
    feats: Option<String>,
}

impl Token {
    /// Validate a raw record, reporting the first rule that fails.
    pub fn validate(raw: &RawToken) -> Result<Self, TokenError> {
        let text = required_str(raw.text.as_ref(), Field::Text)?;
        if text.is_empty() {
            return Err(TokenError::Empty(Field::Text));
        }

        let lemma = required_str(raw.lemma.as_ref(), Field::Lemma)?.trim();
        if lemma.is_empty() {
            return Err(TokenError::Empty(Field::Lemma));
        }

        let tag = required_str(raw.pos.as_ref(), Field::Pos)?;
        let pos = Upos::parse(tag).ok_or_else(|| TokenError::UnknownPos(tag.to_string()))?;

        let feats = optional_str(raw.feats.as_ref(), Field::Feats)?;

        Ok(Self {
            text: text.to_string(),
            lemma: lemma.to_string(),
            pos,
            feats: feats.map(str::to_string),
        })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn lemma(&self) -> &str {
        &self.lemma
    }

    pub fn pos(&self) -> Upos {
        self.pos
    }

    pub fn feats(&self) -> Option<&str> {
        self.feats.as_deref()
    }
}

fn required_str(value: Option<&Value>, field: Field) -> Result<&str, TokenError> {
    optional_str(value, field)?.ok_or(TokenError::Missing(field))
}

/// `None` for absent or `null`; any non-string value is a type error.
fn optional_str(value: Option<&Value>, field: Field) -> Result<Option<&str>, TokenError> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.as_str())),
        Some(_) => Err(TokenError::WrongType(field)),
    }
}

impl TryFrom<&RawToken> for Token {
    type Error = TokenError;

    fn try_from(raw: &RawToken) -> Result<Self, Self::Error> {
        Token::validate(raw)
    }
}

impl From<&Token> for RawToken {
    fn from(token: &Token) -> Self {
        RawToken::new(&token.text, &token.lemma, token.pos.as_str(), token.feats())
    }
}
