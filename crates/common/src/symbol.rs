//! Symbol table built by Pass-I and read by index in Pass-II.
//!
//! Symbols are kept in first-appearance order: whichever comes first of a
//! label definition or an operand reference fixes the symbol's 1-based
//! index, and that index never changes afterwards. The intermediate code
//! refers to symbols only through these indices.
//!
//! Text form (`symtab.txt`), tab separated:
//! ```text
//! Index	Symbol	Address	Defined
//! 1	LOOP	100	YES
//! 2	ALPHA	-1	NO
//! ```
//! An undefined symbol is written with the address sentinel `-1`.

use indexmap::map::Entry;
use indexmap::IndexMap;

use crate::error::DecodeError;

/// Header line of the serialized symbol table.
pub const HEADER: &str = "Index\tSymbol\tAddress\tDefined";

/// Address written for a symbol that was never defined.
const UNDEFINED_ADDRESS: i64 = -1;

/// A named address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Symbol {
    pub name: String,
    /// Bound address, or `None` while the symbol is only referenced.
    pub address: Option<u32>,
}

impl Symbol {
    pub fn is_defined(&self) -> bool {
        self.address.is_some()
    }
}

/// Outcome of [`SymbolTable::define`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Definition {
    /// First appearance of the name; inserted as defined.
    Inserted(usize),
    /// The name was referenced earlier and is now bound.
    Resolved(usize),
    /// The name was already defined. The earlier address is kept.
    Duplicate { index: usize, existing: u32 },
}

/// Ordered symbol table. Indices are 1-based.
#[derive(Debug, Clone, Default)]
pub struct SymbolTable {
    symbols: IndexMap<String, Symbol>,
}

// Two tables are equal only if they assign the same indices.
impl PartialEq for SymbolTable {
    fn eq(&self, other: &Self) -> bool {
        self.symbols.values().eq(other.symbols.values())
    }
}

impl Eq for SymbolTable {}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index of `name`, creating an undefined entry on first reference.
    pub fn reference(&mut self, name: &str) -> usize {
        let entry = self.symbols.entry(name.to_string());
        let index = entry.index() + 1;
        entry.or_insert_with(|| Symbol {
            name: name.to_string(),
            address: None,
        });
        index
    }

    /// Bind `name` to `address`.
    ///
    /// A symbol moves from undefined to defined at most once; a second
    /// definition is reported as [`Definition::Duplicate`] and changes nothing.
    pub fn define(&mut self, name: &str, address: u32) -> Definition {
        match self.symbols.entry(name.to_string()) {
            Entry::Occupied(entry) => {
                let index = entry.index() + 1;
                let symbol = entry.into_mut();
                match symbol.address {
                    Some(existing) => Definition::Duplicate { index, existing },
                    None => {
                        symbol.address = Some(address);
                        Definition::Resolved(index)
                    }
                }
            }
            Entry::Vacant(entry) => {
                let index = entry.index() + 1;
                entry.insert(Symbol {
                    name: name.to_string(),
                    address: Some(address),
                });
                Definition::Inserted(index)
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&Symbol> {
        self.symbols.get(name)
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.symbols.get_index_of(name).map(|pos| pos + 1)
    }

    /// Symbol at a 1-based index.
    pub fn by_index(&self, index: usize) -> Option<&Symbol> {
        let pos = index.checked_sub(1)?;
        self.symbols.get_index(pos).map(|(_, symbol)| symbol)
    }

    /// Resolved address of the symbol at `index`, if it exists and is defined.
    pub fn address_of(&self, index: usize) -> Option<u32> {
        self.by_index(index).and_then(|symbol| symbol.address)
    }

    /// Symbols with their 1-based indices, in index order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &Symbol)> {
        self.symbols
            .values()
            .enumerate()
            .map(|(pos, symbol)| (pos + 1, symbol))
    }

    /// Symbols that are still undefined.
    pub fn undefined(&self) -> impl Iterator<Item = (usize, &Symbol)> {
        self.iter().filter(|(_, symbol)| !symbol.is_defined())
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Encode as `symtab.txt` text: header, then one row per symbol.
    pub fn encode(&self) -> String {
        let mut out = String::from(HEADER);
        out.push('\n');
        for (index, symbol) in self.iter() {
            let address = symbol.address.map_or(UNDEFINED_ADDRESS, i64::from);
            let defined = if symbol.is_defined() { "YES" } else { "NO" };
            out.push_str(&format!("{index}\t{}\t{address}\t{defined}\n", symbol.name));
        }
        out
    }

    /// Decode `symtab.txt` text. Columns may be separated by any whitespace.
    pub fn decode(text: &str) -> Result<Self, DecodeError> {
        let mut lines = text
            .lines()
            .enumerate()
            .map(|(idx, raw)| (idx + 1, raw))
            .filter(|(_, raw)| !raw.trim().is_empty());

        match lines.next() {
            Some((_, header)) if is_header(header) => {}
            _ => return Err(DecodeError::MissingHeader),
        }

        let mut table = SymbolTable::new();
        for (line, raw) in lines {
            let fields: Vec<&str> = raw.split_whitespace().collect();
            let &[index, name, address, defined] = fields.as_slice() else {
                return Err(DecodeError::MalformedSymbolRow {
                    line,
                    text: raw.trim().to_string(),
                });
            };

            let index: usize = index.parse().map_err(|_| DecodeError::InvalidNumber {
                line,
                token: index.to_string(),
            })?;
            let expected = table.len() + 1;
            if index != expected {
                return Err(DecodeError::IndexOutOfSequence {
                    line,
                    expected,
                    found: index,
                });
            }

            let address = parse_address(address, line)?;
            let is_defined = match defined {
                "YES" => true,
                "NO" => false,
                other => {
                    return Err(DecodeError::InvalidDefinedFlag {
                        line,
                        token: other.to_string(),
                    })
                }
            };
            if is_defined != address.is_some() {
                return Err(DecodeError::InconsistentSymbol {
                    line,
                    name: name.to_string(),
                });
            }

            match table.symbols.entry(name.to_string()) {
                Entry::Occupied(_) => {
                    return Err(DecodeError::DuplicateRow {
                        line,
                        name: name.to_string(),
                    })
                }
                Entry::Vacant(entry) => {
                    entry.insert(Symbol {
                        name: name.to_string(),
                        address,
                    });
                }
            }
        }

        Ok(table)
    }
}

fn is_header(line: &str) -> bool {
    line.split_whitespace().eq(HEADER.split('\t'))
}

fn parse_address(token: &str, line: usize) -> Result<Option<u32>, DecodeError> {
    let invalid = || DecodeError::InvalidNumber {
        line,
        token: token.to_string(),
    };
    let value: i64 = token.parse().map_err(|_| invalid())?;
    if value == UNDEFINED_ADDRESS {
        return Ok(None);
    }
    u32::try_from(value).map(Some).map_err(|_| invalid())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indices_follow_first_appearance() {
        let mut table = SymbolTable::new();
        assert_eq!(table.define("LOOP", 100), Definition::Inserted(1));
        assert_eq!(table.reference("ALPHA"), 2);
        assert_eq!(table.reference("BETA"), 3);
        assert_eq!(table.reference("ALPHA"), 2);
        assert_eq!(table.define("BETA", 104), Definition::Resolved(3));
        assert_eq!(table.index_of("BETA"), Some(3));
        assert_eq!(table.len(), 3);
    }

    #[test]
    fn reference_creates_undefined_symbol() {
        let mut table = SymbolTable::new();
        let index = table.reference("X");
        let symbol = table.by_index(index).unwrap();
        assert_eq!(symbol.name, "X");
        assert!(!symbol.is_defined());
        assert_eq!(table.address_of(index), None);
    }

    #[test]
    fn duplicate_definition_keeps_first_address() {
        let mut table = SymbolTable::new();
        table.define("A", 10);
        assert_eq!(
            table.define("A", 20),
            Definition::Duplicate {
                index: 1,
                existing: 10
            }
        );
        assert_eq!(table.get("A").unwrap().address, Some(10));
    }

    #[test]
    fn equality_depends_on_order() {
        let mut ab = SymbolTable::new();
        ab.reference("A");
        ab.reference("B");
        let mut ba = SymbolTable::new();
        ba.reference("B");
        ba.reference("A");
        assert_ne!(ab, ba);
    }

    #[test]
    fn by_index_out_of_range() {
        let mut table = SymbolTable::new();
        table.reference("A");
        assert!(table.by_index(0).is_none());
        assert!(table.by_index(2).is_none());
        assert_eq!(table.address_of(7), None);
    }

    #[test]
    fn undefined_lists_only_unbound_symbols() {
        let mut table = SymbolTable::new();
        table.define("A", 1);
        table.reference("B");
        table.reference("C");
        table.define("C", 4);
        let names: Vec<&str> = table.undefined().map(|(_, s)| s.name.as_str()).collect();
        assert_eq!(names, ["B"]);
    }

    #[test]
    fn encode_uses_sentinel_for_undefined() {
        let mut table = SymbolTable::new();
        table.define("LOOP", 100);
        table.reference("GHOST");
        assert_eq!(
            table.encode(),
            "Index\tSymbol\tAddress\tDefined\n1\tLOOP\t100\tYES\n2\tGHOST\t-1\tNO\n"
        );
    }

    #[test]
    fn encode_empty_table_is_header_only() {
        assert_eq!(SymbolTable::new().encode(), format!("{HEADER}\n"));
    }

    #[test]
    fn decode_accepts_space_separated_columns() {
        let text = "Index  Symbol  Address  Defined\n1  LOOP  100  YES\n2  X  -1  NO\n";
        let table = SymbolTable::decode(text).unwrap();
        assert_eq!(table.address_of(1), Some(100));
        assert_eq!(table.address_of(2), None);
        assert_eq!(table.index_of("X"), Some(2));
    }

    #[test]
    fn decode_encode_is_stable() {
        let mut table = SymbolTable::new();
        table.define("A", 0);
        table.reference("B");
        table.define("C", 65);
        let decoded = SymbolTable::decode(&table.encode()).unwrap();
        assert_eq!(decoded, table);
    }

    #[test]
    fn decode_missing_header() {
        assert_eq!(
            SymbolTable::decode("1\tA\t1\tYES\n"),
            Err(DecodeError::MissingHeader)
        );
        assert_eq!(SymbolTable::decode(""), Err(DecodeError::MissingHeader));
    }

    #[test]
    fn decode_out_of_sequence_index() {
        let text = format!("{HEADER}\n1\tA\t1\tYES\n3\tB\t2\tYES\n");
        assert_eq!(
            SymbolTable::decode(&text),
            Err(DecodeError::IndexOutOfSequence {
                line: 3,
                expected: 2,
                found: 3
            })
        );
    }

    #[test]
    fn decode_inconsistent_flag() {
        let text = format!("{HEADER}\n1\tA\t-1\tYES\n");
        assert!(matches!(
            SymbolTable::decode(&text),
            Err(DecodeError::InconsistentSymbol { line: 2, .. })
        ));
    }

    #[test]
    fn decode_bad_flag_and_short_row() {
        let bad_flag = format!("{HEADER}\n1\tA\t5\tMAYBE\n");
        assert!(matches!(
            SymbolTable::decode(&bad_flag),
            Err(DecodeError::InvalidDefinedFlag { .. })
        ));
        let short = format!("{HEADER}\n1\tA\t5\n");
        assert!(matches!(
            SymbolTable::decode(&short),
            Err(DecodeError::MalformedSymbolRow { line: 2, .. })
        ));
    }

    #[test]
    fn decode_duplicate_row() {
        let text = format!("{HEADER}\n1\tA\t5\tYES\n2\tA\t6\tYES\n");
        assert!(matches!(
            SymbolTable::decode(&text),
            Err(DecodeError::DuplicateRow { line: 3, .. })
        ));
    }

    #[test]
    fn decode_negative_address_other_than_sentinel() {
        let text = format!("{HEADER}\n1\tA\t-7\tYES\n");
        assert!(matches!(
            SymbolTable::decode(&text),
            Err(DecodeError::InvalidNumber { .. })
        ));
    }
}
