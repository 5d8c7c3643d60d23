/*
    FoLiA2OAC (FoLiA to Open Annotation converter)
        Digital Infrastucture, KNAW Humanities Cluster

        Licensed under the GNU General Public License v3
*/

//! This module contains the [`TokenRegistry`], which holds all word tokens of a document,
//! ordered by their structural position.

use regex::Regex;
use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::sync::OnceLock;

use crate::error::FoliaError;
use crate::types::Alignment;

fn position_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| {
        Regex::new(r"\.p\.(\d+)\.s\.(\d+)\.w\.(\d+)").expect("position regex must compile")
    })
}

/// The structural position of a word in a document: paragraph, sentence and word number.
/// Positions order lexicographically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Position {
    pub paragraph: usize,
    pub sentence: usize,
    pub word: usize,
}

impl Position {
    pub fn new(paragraph: usize, sentence: usize, word: usize) -> Self {
        Self {
            paragraph,
            sentence,
            word,
        }
    }

    /// Parses the position from a FoLiA word identifier like `doc.p.3.s.2.w.7`.
    pub fn parse(id: &str) -> Result<Self, FoliaError> {
        let captures = position_regex()
            .captures(id)
            .ok_or_else(|| FoliaError::MalformedTokenId(id.to_string()))?;
        let number = |i: usize| -> Result<usize, FoliaError> {
            captures[i]
                .parse()
                .map_err(|_| FoliaError::MalformedTokenId(id.to_string()))
        };
        Ok(Self::new(number(1)?, number(2)?, number(3)?))
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "p.{}.s.{}.w.{}", self.paragraph, self.sentence, self.word)
    }
}

/// Refers to a [`Token`] in a [`TokenRegistry`] by index. Handles are cheap to copy
/// and only valid for the registry that issued them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TokenHandle(usize);

impl TokenHandle {
    /// Returns the internal index for this handle
    pub fn as_usize(&self) -> usize {
        self.0
    }
}

/// One annotated word
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    id: String,
    text: Option<String>,
    position: Position,
    alignment: Option<Alignment>,
}

impl Token {
    /// Returns the public identifier (`xml:id`) of the token
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the surface text, if the annotation provided any
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn position(&self) -> Position {
        self.position
    }

    /// Returns where this token was found in the source text, `None` if it was not (yet) aligned
    pub fn alignment(&self) -> Option<Alignment> {
        self.alignment
    }
}

/// Sort key of a token: its position, with ties broken by registration order
type SortKey = (Position, usize);

/// Holds all tokens of a document, provides an ordered view and lookup by identifier.
#[derive(Debug, Default)]
pub struct TokenRegistry {
    tokens: Vec<Token>,
    idmap: HashMap<String, TokenHandle>,
    order: BTreeSet<(SortKey, TokenHandle)>,
    /// Reject distinct tokens sharing a position
    strict: bool,
}

impl TokenRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// A strict registry refuses distinct tokens that share the same structural position
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Registers a token by identifier, parsing its structural position from the identifier.
    /// Registering the same identifier twice returns the existing handle.
    pub fn register(&mut self, id: &str) -> Result<TokenHandle, FoliaError> {
        if let Some(handle) = self.idmap.get(id) {
            return Ok(*handle);
        }
        let position = Position::parse(id)?;
        self.insert(id, position)
    }

    /// Like [`Self::register()`], but a malformed identifier does not fail: the token is
    /// positioned directly after the most recently registered token instead.
    pub fn register_lenient(&mut self, id: &str) -> Result<TokenHandle, FoliaError> {
        match self.register(id) {
            Err(FoliaError::MalformedTokenId(_)) => {
                let position = self
                    .tokens
                    .last()
                    .map(|token| token.position)
                    .unwrap_or_default();
                tracing::warn!(
                    "Token identifier {} does not encode a position, placing it after {}",
                    id,
                    position
                );
                self.insert(id, position)
            }
            result => result,
        }
    }

    fn insert(&mut self, id: &str, position: Position) -> Result<TokenHandle, FoliaError> {
        let seqnr = self.tokens.len();
        if self.strict {
            let lower = ((position, 0), TokenHandle(0));
            if let Some((_, existing)) = self
                .order
                .range(lower..)
                .next()
                .filter(|((p, _), _)| *p == position)
            {
                return Err(FoliaError::DuplicatePosition(
                    self.tokens[existing.0].id.clone(),
                    id.to_string(),
                ));
            }
        }
        let handle = TokenHandle(seqnr);
        self.tokens.push(Token {
            id: id.to_string(),
            text: None,
            position,
            alignment: None,
        });
        self.idmap.insert(id.to_string(), handle);
        self.order.insert(((position, seqnr), handle));
        Ok(handle)
    }

    /// Attaches surface text to a previously registered token
    pub fn set_text(&mut self, id: &str, text: impl Into<String>) -> Result<(), FoliaError> {
        let handle = self.resolve(id)?;
        self.tokens[handle.0].text = Some(text.into());
        Ok(())
    }

    /// Assigns the alignment of a token. This can only be done once per token.
    pub fn set_alignment(
        &mut self,
        handle: TokenHandle,
        alignment: Alignment,
    ) -> Result<(), FoliaError> {
        let token = self
            .tokens
            .get_mut(handle.0)
            .ok_or_else(|| FoliaError::UnknownToken(format!("#{}", handle.0), "set_alignment"))?;
        if token.alignment.is_some() {
            return Err(FoliaError::AlreadyAligned(token.id.clone()));
        }
        token.alignment = Some(alignment);
        Ok(())
    }

    /// Resolves a public identifier to a handle
    pub fn resolve(&self, id: &str) -> Result<TokenHandle, FoliaError> {
        self.idmap
            .get(id)
            .copied()
            .ok_or_else(|| FoliaError::UnknownToken(id.to_string(), "resolving token"))
    }

    /// Looks up a token by its public identifier
    pub fn lookup(&self, id: &str) -> Option<&Token> {
        self.idmap.get(id).map(|handle| &self.tokens[handle.0])
    }

    /// Returns a token by handle
    pub fn get(&self, handle: TokenHandle) -> Option<&Token> {
        self.tokens.get(handle.0)
    }

    /// Iterates over all tokens in ascending structural order
    pub fn ordered_tokens(&self) -> impl Iterator<Item = &Token> {
        self.order.iter().map(|(_, handle)| &self.tokens[handle.0])
    }

    /// Returns the handles of all tokens in ascending structural order
    pub fn ordered_handles(&self) -> Vec<TokenHandle> {
        self.order.iter().map(|(_, handle)| *handle).collect()
    }

    /// Sorts a set of handles into structural order and removes duplicates
    pub fn sort_handles(&self, handles: &mut Vec<TokenHandle>) {
        handles.sort_unstable_by_key(|handle| (self.tokens[handle.0].position, handle.0));
        handles.dedup();
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}
