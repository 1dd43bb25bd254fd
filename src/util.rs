//! String interning for common GEDCOM text.
//!
//! GEDCOM files repeat a small vocabulary endlessly: level digits, tag
//! names, and a handful of complete lines (`0 TRLR`, `1 BIRT`, ...). The
//! readers and tokenizer route text through [`intern`] so exactly-matching
//! occurrences share one static backing string instead of allocating per
//! line. The table is process-wide, built once, and never mutated after
//! initialization.

use std::borrow::Cow;
use std::collections::HashSet;

use once_cell::sync::Lazy;

/// The interned vocabulary: level digits, record and substructure tags, and
/// complete lines that appear verbatim in most files.
static COMMON: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    let mut set = HashSet::new();
    for s in [
        // level digits
        "0", "1", "2", "3", "4", "5",
        // record tags
        "HEAD", "TRLR", "INDI", "FAM", "OBJE", "NOTE", "SOUR", "REPO", "SUBM", "SUBN",
        // structural tags
        "CONT", "CONC", "GEDC", "VERS", "FORM", "CHAR", "LANG", "DEST", "DATE", "TIME", "COPR",
        "FILE", "PLAC", "CHAN", "REFN", "RIN", "RFN", "AFN", "TYPE", "RESN", "UID",
        // individual and family tags
        "NAME", "GIVN", "SURN", "NPFX", "NSFX", "SPFX", "NICK", "SEX", "BIRT", "DEAT", "BURI",
        "CREM", "BAPM", "BARM", "BASM", "BLES", "CHR", "CHRA", "CONF", "FCOM", "ORDN", "NATU",
        "EMIG", "IMMI", "CENS", "PROB", "WILL", "GRAD", "RETI", "EVEN", "FACT", "ADOP", "RESI",
        "HUSB", "WIFE", "CHIL", "NCHI", "MARR", "ANUL", "DIV", "DIVF", "ENGA", "MARB", "MARC",
        "MARL", "MARS", "FAMC", "FAMS", "PEDI", "STAT", "ASSO", "RELA", "ALIA", "ANCI", "DESI",
        // attributes
        "CAST", "DSCR", "EDUC", "IDNO", "NATI", "NMR", "OCCU", "PROP", "RELI", "SSN", "TITL",
        // source and citation tags
        "AUTH", "ABBR", "PUBL", "TEXT", "DATA", "PAGE", "QUAY", "AGNC", "CALN", "MEDI",
        // addresses and contact details
        "ADDR", "ADR1", "ADR2", "ADR3", "CITY", "STAE", "POST", "CTRY", "PHON", "EMAIL", "FAX",
        "WWW", "CORP",
        // event detail tags
        "AGE", "CAUS",
        // common whole lines
        "0 HEAD", "0 TRLR", "1 GEDC", "2 VERS 5.5", "2 VERS 5.5.1", "2 FORM LINEAGE-LINKED",
        "1 CHAR ANSEL", "1 CHAR ASCII", "1 CHAR UTF-8", "1 BIRT", "1 DEAT", "1 MARR", "1 CHAN",
        "1 SEX M", "1 SEX F", "2 DATA", "3 TEXT",
    ] {
        set.insert(s);
    }
    set
});

/// Returns a shared static copy of `s` when it is in the common vocabulary.
pub(crate) fn intern(s: &str) -> Option<&'static str> {
    COMMON.get(s).copied()
}

/// Interns `s` when possible, otherwise takes ownership of it.
pub(crate) fn intern_or_own(s: String) -> Cow<'static, str> {
    match intern(&s) {
        Some(shared) => Cow::Borrowed(shared),
        None => Cow::Owned(s),
    }
}
