//! Data structures representing the parsed contents of a GEDCOM file.
//!
//! The [`Gedcom`] root owns every record through one insertion-ordered map
//! per record kind, keyed by cross-reference identifier. Links between
//! records are stored as xref strings and resolved through the root's maps
//! on access, which keeps mutually-referencing records (family ↔
//! individual) free of ownership cycles.

#[cfg(feature = "json")]
use serde::{Deserialize, Serialize};

use indexmap::IndexMap;

pub mod address;
pub mod annotations;
pub mod citation;
pub mod custom;
pub mod date;
pub mod event;
pub mod family;
pub mod header;
pub mod individual;
pub mod multimedia;
pub mod note;
pub mod place;
pub mod repository;
pub mod source;
pub mod submission;
pub mod submitter;

pub use address::Address;
pub use annotations::Annotations;
pub use citation::{Citation, CitationData};
pub use custom::CustomFact;
pub use date::{ChangeDate, Date};
pub use event::{Event, EventDetail};
pub use family::Family;
pub use header::{CharacterSet, Corporation, GedcomMeta, Header, SourceSystem};
pub use individual::{Association, Attribute, FamilyLink, Individual, PersonalName, Sex};
pub use multimedia::{MediaLink, Multimedia, MultimediaFile};
pub use note::{Note, NoteRecord};
pub use place::Place;
pub use repository::Repository;
pub use source::{CallNumber, RepoCitation, Source, SourceData, SourceDataEvent};
pub use submission::Submission;
pub use submitter::Submitter;

/// A cross-reference identifier, including its `@` delimiters (`@I1@`).
pub type Xref = String;

/// The trailer sentinel. Its presence records that the file ended with the
/// mandatory `0 TRLR` line.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "json", derive(Serialize, Deserialize))]
pub struct Trailer;

/// A fully parsed GEDCOM file.
///
/// Record iteration order is input order; parsing the same bytes twice
/// produces equal graphs.
#[derive(Debug, Default)]
#[cfg_attr(feature = "json", derive(Serialize, Deserialize))]
pub struct Gedcom {
    /// File metadata from the mandatory HEAD record.
    pub header: Header,
    /// The optional SUBN record.
    pub submission: Option<Submission>,
    /// Present when the file ended with `0 TRLR`.
    pub trailer: Option<Trailer>,
    /// Individuals, keyed by xref.
    pub individuals: IndexMap<Xref, Individual>,
    /// Family units, keyed by xref.
    pub families: IndexMap<Xref, Family>,
    /// Multimedia records, keyed by xref.
    pub multimedia: IndexMap<Xref, Multimedia>,
    /// Standalone note records, keyed by xref.
    pub notes: IndexMap<Xref, NoteRecord>,
    /// Source records, keyed by xref.
    pub sources: IndexMap<Xref, Source>,
    /// Repository records, keyed by xref.
    pub repositories: IndexMap<Xref, Repository>,
    /// Submitter records, keyed by xref.
    pub submitters: IndexMap<Xref, Submitter>,
    /// Level-0 records with user-defined (`_`-prefixed) tags.
    pub custom_records: Vec<CustomFact>,
}

impl Gedcom {
    /// Finds an individual by cross-reference identifier.
    #[must_use]
    pub fn individual(&self, xref: &str) -> Option<&Individual> {
        self.individuals.get(xref)
    }

    /// Finds a family by cross-reference identifier.
    #[must_use]
    pub fn family(&self, xref: &str) -> Option<&Family> {
        self.families.get(xref)
    }

    /// Finds a source by cross-reference identifier.
    #[must_use]
    pub fn source(&self, xref: &str) -> Option<&Source> {
        self.sources.get(xref)
    }

    /// Finds a repository by cross-reference identifier.
    #[must_use]
    pub fn repository(&self, xref: &str) -> Option<&Repository> {
        self.repositories.get(xref)
    }

    /// Finds a multimedia record by cross-reference identifier.
    #[must_use]
    pub fn multimedia_record(&self, xref: &str) -> Option<&Multimedia> {
        self.multimedia.get(xref)
    }

    /// Finds a standalone note record by cross-reference identifier.
    #[must_use]
    pub fn note_record(&self, xref: &str) -> Option<&NoteRecord> {
        self.notes.get(xref)
    }

    /// Finds a submitter by cross-reference identifier.
    #[must_use]
    pub fn submitter(&self, xref: &str) -> Option<&Submitter> {
        self.submitters.get(xref)
    }

    /// The submitter named by the header, if present and resolvable.
    #[must_use]
    pub fn header_submitter(&self) -> Option<&Submitter> {
        self.submitters.get(self.header.submitter.as_deref()?)
    }

    /// The families in which the individual appears as a spouse or partner.
    #[must_use]
    pub fn families_as_spouse(&self, individual_xref: &str) -> Vec<&Family> {
        self.families
            .values()
            .filter(|family| {
                family.husband.as_deref() == Some(individual_xref)
                    || family.wife.as_deref() == Some(individual_xref)
            })
            .collect()
    }

    /// The families in which the individual appears as a child.
    #[must_use]
    pub fn families_as_child(&self, individual_xref: &str) -> Vec<&Family> {
        self.families
            .values()
            .filter(|family| family.children.iter().any(|c| c == individual_xref))
            .collect()
    }

    /// The children of a family, resolved to individuals.
    #[must_use]
    pub fn children_of(&self, family: &Family) -> Vec<&Individual> {
        family
            .children
            .iter()
            .filter_map(|xref| self.individuals.get(xref))
            .collect()
    }

    /// Total count of mapped records of every kind.
    #[must_use]
    pub fn total_records(&self) -> usize {
        self.individuals.len()
            + self.families.len()
            + self.multimedia.len()
            + self.notes.len()
            + self.sources.len()
            + self.repositories.len()
            + self.submitters.len()
    }

    /// Prints a summary of record counts to stdout.
    pub fn stats(&self) {
        println!("----------------------");
        println!("| Gedcom Data Stats: |");
        println!("----------------------");
        println!("  submitters: {}", self.submitters.len());
        println!("  individuals: {}", self.individuals.len());
        println!("  families: {}", self.families.len());
        println!("  notes: {}", self.notes.len());
        println!("  repositories: {}", self.repositories.len());
        println!("  sources: {}", self.sources.len());
        println!("  multimedia: {}", self.multimedia.len());
        println!("----------------------");
    }
}
