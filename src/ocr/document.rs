//! Hierarchical OCR output and its flattening into plain text.

use std::iter;

/// Structural level of a branch in the text tree
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Document,
    Page,
    Block,
    Paragraph,
}

/// A recognised word: its symbols in reading order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Word {
    pub symbols: Vec<String>,
}

impl Word {
    pub fn new<I, S>(symbols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            symbols: symbols.into_iter().map(Into::into).collect(),
        }
    }

    /// Symbols concatenated with no separator
    pub fn text(&self) -> String {
        self.symbols.concat()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextNode {
    Branch { level: Level, children: Vec<TextNode> },
    Word(Word),
}

impl TextNode {
    pub fn branch(level: Level, children: Vec<TextNode>) -> Self {
        TextNode::Branch { level, children }
    }

    pub fn empty() -> Self {
        TextNode::branch(Level::Document, Vec::new())
    }

    /// Depth-first, in-order sequence of every word under this node
    pub fn words(&self) -> Box<dyn Iterator<Item = &Word> + '_> {
        match self {
            TextNode::Word(word) => Box::new(iter::once(word)),
            TextNode::Branch { children, .. } => {
                Box::new(children.iter().flat_map(|child| child.words()))
            }
        }
    }

    /// Word texts joined with single spaces; words without text are skipped
    pub fn flatten(&self) -> String {
        self.words()
            .map(Word::text)
            .filter(|text| !text.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }
}
