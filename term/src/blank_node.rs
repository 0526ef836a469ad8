//! Blank node labels like specified in [RDF](https://www.w3.org/TR/rdf11-primer/#section-blank-node).

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// A simplified production of N-Triples' BLANK_NODE_LABEL,
    /// restricted to the ASCII range.
    ///
    /// In contrast to the N-Triples rule this regular expression does not look
    /// for a leading `_:`. Accordingly it only checks if the label is valid.
    ///
    /// # Rule
    ///
    /// `BLANK_NODE_LABEL ::= (PN_CHARS_U | [0-9]) ((PN_CHARS | '.')* PN_CHARS)?`
    static ref BLANK_NODE_LABEL: Regex = Regex::new(r"(?x)
      ^
      [A-Za-z_0-9]
      (
          [A-Za-z_0-9\-]
          |
          \. [A-Za-z_0-9\-]
      )*
      $
    ").unwrap();
}

/// Check whether `id` is a valid blank node label (without the leading `_:`).
pub fn is_valid_bnode_id(id: &str) -> bool {
    BLANK_NODE_LABEL.is_match(id)
}
