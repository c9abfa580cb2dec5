//! Keyword table: operator names to integer opcodes.
//!
//! Programs name operators by opcode atoms. The table assigns opcodes by
//! position and carries an alias remap, so a textual spelling such as `+`
//! resolves to the canonical operator `add` while keeping a single opcode.

use rustc_hash::FxHashMap;

use opacity_sexp::Term;

/// Keywords of the standard dialect, in opcode order.
///
/// Opcode 0 is reserved: it decodes from the empty atom, which must never
/// name an operator.
pub const STANDARD_KEYWORDS: &[&str] = &[
    ".",
    // Special forms
    "quote",
    "eval",
    "apply",
    "case",
    "env",
    "reduce",
    "quasiquote",
    "unquote",
    "choose1",
    // Structural primitives
    "cons",
    "first",
    "rest",
    "list",
    "listp",
    "equal",
    // Logic
    "not",
    "and",
    "or",
    "raise",
    // Arithmetic, spelled through aliases
    "+",
    "-",
    "*",
    "/",
];

/// Textual spellings and the canonical operator they stand for.
pub const STANDARD_ALIASES: &[(&str, &str)] = &[
    ("+", "add"),
    ("*", "multiply"),
    ("-", "subtract"),
    ("/", "divide"),
];

/// Operator prepended to a list whose head is itself a list.
pub const DEFAULT_OPERATOR: &str = "and";

/// Integer identifying an operator or special form.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Opcode(u32);

impl Opcode {
    #[inline]
    pub const fn new(raw: u32) -> Self {
        Opcode(raw)
    }

    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Decode the opcode named by an atom.
    ///
    /// `None` for non-atoms and for integers outside the opcode range.
    #[inline]
    pub fn from_term(term: &Term) -> Option<Self> {
        term.as_int()
            .and_then(|value| u32::try_from(value).ok())
            .map(Opcode)
    }

    /// The atom that names this opcode in a program.
    #[inline]
    pub fn to_term(self) -> Term {
        Term::int(i64::from(self.0))
    }
}

/// Maps textual operator spellings to canonical names.
#[derive(Clone, Debug, Default)]
pub struct AliasRemap {
    aliases: FxHashMap<String, String>,
}

impl AliasRemap {
    /// An empty remap: every name is its own canonical name.
    pub fn new() -> Self {
        AliasRemap::default()
    }

    /// The arithmetic spellings of the standard dialect.
    pub fn standard() -> Self {
        STANDARD_ALIASES
            .iter()
            .fold(AliasRemap::new(), |remap, (alias, canonical)| {
                remap.with_alias(*alias, *canonical)
            })
    }

    #[must_use]
    pub fn with_alias(mut self, alias: impl Into<String>, canonical: impl Into<String>) -> Self {
        self.aliases.insert(alias.into(), canonical.into());
        self
    }

    /// The canonical name for `name`, or `name` itself if it is not an alias.
    pub fn canonical<'a>(&'a self, name: &'a str) -> &'a str {
        self.aliases.get(name).map_or(name, String::as_str)
    }

    /// Every alias whose canonical name is `canonical`.
    pub fn aliases_of<'a>(&'a self, canonical: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.aliases
            .iter()
            .filter(move |(_, target)| target.as_str() == canonical)
            .map(|(alias, _)| alias.as_str())
    }

    pub fn len(&self) -> usize {
        self.aliases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.aliases.is_empty()
    }
}

/// Immutable name ↔ opcode mapping with its alias remap.
#[derive(Clone, Debug)]
pub struct KeywordTable {
    /// Keyword spellings indexed by opcode.
    names: Vec<String>,
    by_name: FxHashMap<String, Opcode>,
    remap: AliasRemap,
}

impl KeywordTable {
    /// Assign opcodes to `keywords` by position.
    ///
    /// A repeated keyword keeps its first opcode.
    pub fn new<I, S>(keywords: I, remap: AliasRemap) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = keywords.into_iter().map(Into::into).collect();
        let mut by_name = FxHashMap::default();
        for (name, raw) in names.iter().zip(0u32..) {
            by_name.entry(name.clone()).or_insert(Opcode(raw));
        }
        KeywordTable {
            names,
            by_name,
            remap,
        }
    }

    /// The standard dialect: [`STANDARD_KEYWORDS`] with [`STANDARD_ALIASES`].
    pub fn standard() -> Self {
        KeywordTable::new(STANDARD_KEYWORDS.iter().copied(), AliasRemap::standard())
    }

    /// Opcode for a keyword or for a canonical name reached through an alias.
    ///
    /// `opcode("+")` and `opcode("add")` agree in the standard table.
    pub fn opcode(&self, name: &str) -> Option<Opcode> {
        if let Some(&opcode) = self.by_name.get(name) {
            return Some(opcode);
        }
        self.remap
            .aliases_of(name)
            .find_map(|alias| self.by_name.get(alias).copied())
    }

    /// The keyword spelling assigned to `opcode`.
    pub fn name(&self, opcode: Opcode) -> Option<&str> {
        let index = usize::try_from(opcode.raw()).ok()?;
        self.names.get(index).map(String::as_str)
    }

    /// The canonical operator name for `opcode`, after alias remapping.
    pub fn canonical_name(&self, opcode: Opcode) -> Option<&str> {
        self.name(opcode).map(|name| self.remap.canonical(name))
    }

    /// `(opcode, canonical name)` for every keyword, in opcode order.
    ///
    /// Repeated spellings are yielded once, under their first opcode.
    pub fn iter(&self) -> impl Iterator<Item = (Opcode, &str)> + '_ {
        self.names
            .iter()
            .zip(0u32..)
            .filter(|(name, raw)| self.by_name.get(name.as_str()) == Some(&Opcode(*raw)))
            .map(|(name, raw)| (Opcode(raw), self.remap.canonical(name)))
    }

    pub fn remap(&self) -> &AliasRemap {
        &self.remap
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl Default for KeywordTable {
    fn default() -> Self {
        KeywordTable::standard()
    }
}
