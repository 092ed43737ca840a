//! # Byte Trie over Piece Surfaces

use crate::{types::TokenType, vocab::PieceVocab};

const ROOT: u32 = 0;

#[derive(Debug, Clone, PartialEq)]
struct TrieNode<T: TokenType> {
    /// Sorted by byte.
    children: Vec<(u8, u32)>,

    /// Piece ending at this node, if any.
    terminal: Option<T>,
}

impl<T: TokenType> TrieNode<T> {
    fn new() -> Self {
        Self {
            children: Vec::new(),
            terminal: None,
        }
    }

    fn child(
        &self,
        b: u8,
    ) -> Option<u32> {
        self.children
            .binary_search_by_key(&b, |&(k, _)| k)
            .ok()
            .map(|idx| self.children[idx].1)
    }
}

/// A piece whose surface is a prefix of the scanned text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrefixMatch<T: TokenType> {
    /// The matched piece.
    pub token: T,

    /// Byte offset one past the end of the match.
    pub end: usize,
}

/// Prefix tree over piece surfaces.
///
/// Immutable after construction; shared freely across encode calls.
///
/// ## Style Hints
/// Instance names should prefer `trie`.
#[derive(Debug, Clone, PartialEq)]
pub struct PieceTrie<T: TokenType> {
    nodes: Vec<TrieNode<T>>,
    piece_count: usize,
}

impl<T: TokenType> Default for PieceTrie<T> {
    fn default() -> Self {
        Self {
            nodes: vec![TrieNode::new()],
            piece_count: 0,
        }
    }
}

impl<T: TokenType> PieceTrie<T> {
    /// Build a trie over the matchable pieces of a vocabulary.
    ///
    /// Only [`crate::vocab::PieceKind::Normal`] and
    /// [`crate::vocab::PieceKind::UserDefined`] pieces are indexed;
    /// control, unknown, and byte pieces are never matched from text.
    pub fn from_vocab(vocab: &PieceVocab<T>) -> Self {
        Self::from_surfaces(
            vocab
                .pieces()
                .iter()
                .filter(|p| p.kind.is_matchable())
                .map(|p| (p.surface.as_slice(), p.id)),
        )
    }

    /// Build a trie from `(surface, token)` pairs.
    ///
    /// Empty surfaces are ignored; a repeated surface keeps the last token.
    pub fn from_surfaces<'a, I>(surfaces: I) -> Self
    where
        I: IntoIterator<Item = (&'a [u8], T)>,
    {
        let mut trie = Self::default();
        for (surface, token) in surfaces {
            trie.insert(surface, token);
        }
        trie.nodes.shrink_to_fit();
        trie
    }

    fn insert(
        &mut self,
        surface: &[u8],
        token: T,
    ) {
        if surface.is_empty() {
            return;
        }

        let mut node = ROOT;
        for &b in surface {
            let next_id = self.nodes.len() as u32;
            let children = &mut self.nodes[node as usize].children;
            node = match children.binary_search_by_key(&b, |&(k, _)| k) {
                Ok(idx) => children[idx].1,
                Err(idx) => {
                    children.insert(idx, (b, next_id));
                    self.nodes.push(TrieNode::new());
                    next_id
                }
            };
        }

        if self.nodes[node as usize].terminal.replace(token).is_none() {
            self.piece_count += 1;
        }
    }

    /// The number of indexed pieces.
    pub fn len(&self) -> usize {
        self.piece_count
    }

    /// Is the trie empty?
    pub fn is_empty(&self) -> bool {
        self.piece_count == 0
    }

    /// The number of trie nodes, including the root.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Exact surface lookup.
    pub fn get(
        &self,
        surface: &[u8],
    ) -> Option<T> {
        let mut node = ROOT;
        for &b in surface {
            node = self.nodes[node as usize].child(b)?;
        }
        self.nodes[node as usize].terminal
    }

    /// All pieces whose surface is a prefix of `text[offset..]`.
    ///
    /// Matches are produced by increasing length. Each call returns a
    /// fresh iterator; no iteration state is shared.
    pub fn prefix_matches<'a>(
        &'a self,
        text: &'a [u8],
        offset: usize,
    ) -> PrefixMatches<'a, T> {
        PrefixMatches {
            trie: self,
            text,
            pos: offset,
            node: (offset < text.len()).then_some(ROOT),
        }
    }

    /// Alias of [`Self::prefix_matches`].
    pub fn longest_matches_at<'a>(
        &'a self,
        text: &'a [u8],
        offset: usize,
    ) -> PrefixMatches<'a, T> {
        self.prefix_matches(text, offset)
    }
}

/// Lazy iterator over [`PrefixMatch`]es; see [`PieceTrie::prefix_matches`].
#[derive(Debug, Clone)]
pub struct PrefixMatches<'a, T: TokenType> {
    trie: &'a PieceTrie<T>,
    text: &'a [u8],
    pos: usize,
    node: Option<u32>,
}

impl<T: TokenType> Iterator for PrefixMatches<'_, T> {
    type Item = PrefixMatch<T>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let node = self.node?;
            let Some(&b) = self.text.get(self.pos) else {
                self.node = None;
                return None;
            };
            let Some(child) = self.trie.nodes[node as usize].child(b) else {
                self.node = None;
                return None;
            };

            self.pos += 1;
            self.node = Some(child);

            if let Some(token) = self.trie.nodes[child as usize].terminal {
                return Some(PrefixMatch {
                    token,
                    end: self.pos,
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vocab::utility::testing::build_test_vocab;

    fn small_trie() -> PieceTrie<u32> {
        PieceTrie::from_surfaces([
            (b"u".as_slice(), 1),
            (b"un".as_slice(), 2),
            (b"undo".as_slice(), 3),
            (b"do".as_slice(), 4),
        ])
    }

    #[test]
    fn test_prefix_matches_order() {
        let trie = small_trie();
        assert_eq!(trie.len(), 4);

        let matches: Vec<_> = trie.prefix_matches(b"undone", 0).collect();
        assert_eq!(
            matches,
            vec![
                PrefixMatch { token: 1, end: 1 },
                PrefixMatch { token: 2, end: 2 },
                PrefixMatch { token: 3, end: 4 },
            ]
        );

        let matches: Vec<_> = trie.prefix_matches(b"undone", 2).collect();
        assert_eq!(matches, vec![PrefixMatch { token: 4, end: 4 }]);

        assert_eq!(trie.prefix_matches(b"undone", 4).count(), 0);
        assert_eq!(trie.prefix_matches(b"undone", 6).count(), 0);
        assert_eq!(trie.prefix_matches(b"undone", 99).count(), 0);
    }

    #[test]
    fn test_restartable() {
        let trie = small_trie();
        let first: Vec<_> = trie.longest_matches_at(b"undo", 0).collect();
        let second: Vec<_> = trie.longest_matches_at(b"undo", 0).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_get() {
        let trie = small_trie();
        assert_eq!(trie.get(b"undo"), Some(3));
        assert_eq!(trie.get(b"und"), None);
        assert_eq!(trie.get(b""), None);
        assert_eq!(trie.get(b"x"), None);
    }

    #[test]
    fn test_from_vocab_skips_unmatchable() {
        let vocab = build_test_vocab::<u32>();
        let trie = PieceTrie::from_vocab(&vocab);

        assert_eq!(trie.get(b"<unk>"), None);
        assert_eq!(trie.get(b"<s>"), None);
        assert_eq!(trie.get(b"<0x41>"), None);
        assert_eq!(trie.get(b"<sep>"), vocab.id_of(b"<sep>"));
        assert_eq!(trie.get("▁hello".as_bytes()), vocab.id_of("▁hello".as_bytes()));

        let matchable = vocab
            .pieces()
            .iter()
            .filter(|p| p.kind.is_matchable())
            .count();
        assert_eq!(trie.len(), matchable);
    }
}
