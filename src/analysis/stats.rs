//! Documentation coverage statistics.

use std::collections::BTreeMap;

use serde::Serialize;

use super::types::{ExportedSymbol, SymbolKind};

/// Rounds `documented / total` to a whole percentage; an empty set is 100%.
///
/// Only a fully documented set reports 100: an incomplete one is capped at
/// 99 even when it would round up.
pub fn coverage_percentage(documented: usize, total: usize) -> u32 {
    if total == 0 || documented >= total {
        return 100;
    }
    let rounded = ((documented as f64 / total as f64) * 100.0).round() as u32;
    rounded.min(99)
}

/// Totals for a single symbol kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct KindStats {
    pub total: usize,
    pub documented: usize,
}

impl KindStats {
    pub fn undocumented(&self) -> usize {
        self.total - self.documented
    }

    pub fn percentage(&self) -> u32 {
        coverage_percentage(self.documented, self.total)
    }
}

/// Coverage summary over a set of symbols.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DocumentationStats {
    pub total: usize,
    pub documented: usize,
    pub undocumented: usize,
    pub percentage: u32,
    pub by_kind: BTreeMap<SymbolKind, KindStats>,
}

impl DocumentationStats {
    /// Reduces symbols into totals and a per-kind breakdown.
    pub fn from_symbols<'a, I>(symbols: I) -> Self
    where
        I: IntoIterator<Item = &'a ExportedSymbol>,
    {
        let mut total = 0;
        let mut documented = 0;
        let mut by_kind: BTreeMap<SymbolKind, KindStats> = BTreeMap::new();

        for symbol in symbols {
            let kind = by_kind.entry(symbol.kind).or_default();
            kind.total += 1;
            total += 1;
            if symbol.has_documentation {
                kind.documented += 1;
                documented += 1;
            }
        }

        Self {
            total,
            documented,
            undocumented: total - documented,
            percentage: coverage_percentage(documented, total),
            by_kind,
        }
    }

    /// Returns true when every symbol is documented (vacuously for none).
    pub fn is_complete(&self) -> bool {
        self.documented == self.total
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::types::ExportKind;

    fn symbol(name: &str, kind: SymbolKind, documented: bool) -> ExportedSymbol {
        ExportedSymbol {
            name: name.to_string(),
            kind,
            source_file: "mod.ts".into(),
            line: 1,
            has_documentation: documented,
            documentation: documented.then(|| "/** doc */".to_string()),
            export_kind: ExportKind::Named,
        }
    }

    #[test]
    fn test_empty_is_full_coverage() {
        let stats = DocumentationStats::from_symbols(&[]);
        assert_eq!(stats.total, 0);
        assert_eq!(stats.percentage, 100);
        assert!(stats.is_complete());
        assert!(stats.by_kind.is_empty());
    }

    #[test]
    fn test_all_undocumented() {
        let symbols = vec![
            symbol("f", SymbolKind::Function, false),
            symbol("C", SymbolKind::Class, false),
            symbol("I", SymbolKind::Interface, false),
            symbol("K", SymbolKind::Const, false),
        ];
        let stats = DocumentationStats::from_symbols(&symbols);
        assert_eq!(stats.total, 4);
        assert_eq!(stats.documented, 0);
        assert_eq!(stats.undocumented, 4);
        assert_eq!(stats.percentage, 0);
    }

    #[test]
    fn test_rounding() {
        let symbols = vec![
            symbol("a", SymbolKind::Function, true),
            symbol("b", SymbolKind::Function, false),
            symbol("c", SymbolKind::Function, false),
        ];
        assert_eq!(DocumentationStats::from_symbols(&symbols).percentage, 33);

        let symbols = vec![
            symbol("a", SymbolKind::Function, true),
            symbol("b", SymbolKind::Function, true),
            symbol("c", SymbolKind::Function, false),
        ];
        assert_eq!(DocumentationStats::from_symbols(&symbols).percentage, 67);

        assert_eq!(coverage_percentage(1, 8), 13);
        assert_eq!(coverage_percentage(1, 200), 1);
        assert_eq!(coverage_percentage(199, 200), 99);
        assert_eq!(coverage_percentage(200, 200), 100);
    }

    #[test]
    fn test_by_kind() {
        let symbols = vec![
            symbol("a", SymbolKind::Function, true),
            symbol("b", SymbolKind::Function, false),
            symbol("T", SymbolKind::Type, true),
        ];
        let stats = DocumentationStats::from_symbols(&symbols);

        let functions = stats.by_kind[&SymbolKind::Function];
        assert_eq!(functions, KindStats { total: 2, documented: 1 });
        assert_eq!(functions.undocumented(), 1);
        assert_eq!(functions.percentage(), 50);
        assert_eq!(stats.by_kind[&SymbolKind::Type].percentage(), 100);
        assert!(!stats.by_kind.contains_key(&SymbolKind::Enum));
    }

    #[test]
    fn test_invariants_hold() {
        for documented in 0..=7 {
            let symbols: Vec<_> = (0..7)
                .map(|i| symbol(&format!("s{i}"), SymbolKind::Const, i < documented))
                .collect();
            let stats = DocumentationStats::from_symbols(&symbols);
            assert_eq!(stats.documented + stats.undocumented, stats.total);
            assert!(stats.percentage <= 100);
            assert_eq!(stats.percentage == 100, stats.documented == stats.total);
        }
    }
}
