use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::IncompatibleOrderDomain;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contig {
    pub name: String,
    #[serde(default)]
    pub length: Option<u64>,
}

impl Contig {
    pub fn new(name: impl Into<String>, length: Option<u64>) -> Self {
        Self {
            name: name.into(),
            length,
        }
    }
}

/// Ordered list of contigs. A contig's position in the list is its sort
/// rank when ordering variants.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<Contig>", into = "Vec<Contig>")]
pub struct SequenceDictionary {
    contigs: Vec<Contig>,
    index: HashMap<String, usize>,
}

impl SequenceDictionary {
    /// Build a dictionary from contigs in sort order. If a name repeats,
    /// the first occurrence defines its rank.
    pub fn new(contigs: Vec<Contig>) -> Self {
        let mut index = HashMap::with_capacity(contigs.len());
        for (i, contig) in contigs.iter().enumerate() {
            index.entry(contig.name.clone()).or_insert(i);
        }
        Self { contigs, index }
    }

    pub fn len(&self) -> usize {
        self.contigs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contigs.is_empty()
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    pub fn get(&self, index: usize) -> Option<&Contig> {
        self.contigs.get(index)
    }

    pub fn contigs(&self) -> &[Contig] {
        &self.contigs
    }

    pub fn iter(&self) -> impl Iterator<Item = &Contig> {
        self.contigs.iter()
    }

    /// Check that `other` can be ordered by this dictionary: every contig it
    /// lists must appear here at the same index.
    ///
    /// `other` may be shorter than `self`; contigs `self` has that `other`
    /// lacks are fine.
    pub fn check_compatible(&self, other: &[Contig]) -> Result<(), IncompatibleOrderDomain> {
        for (found, contig) in other.iter().enumerate() {
            match self.index_of(&contig.name) {
                None => {
                    return Err(IncompatibleOrderDomain::MissingContig {
                        name: contig.name.clone(),
                    })
                }
                Some(expected) if expected != found => {
                    return Err(IncompatibleOrderDomain::MisplacedContig {
                        name: contig.name.clone(),
                        expected,
                        found,
                    })
                }
                Some(_) => {}
            }
        }
        Ok(())
    }

    pub fn is_compatible(&self, other: &[Contig]) -> bool {
        self.check_compatible(other).is_ok()
    }
}

impl From<Vec<Contig>> for SequenceDictionary {
    fn from(contigs: Vec<Contig>) -> Self {
        Self::new(contigs)
    }
}

impl From<SequenceDictionary> for Vec<Contig> {
    fn from(dict: SequenceDictionary) -> Self {
        dict.contigs
    }
}

impl FromIterator<Contig> for SequenceDictionary {
    fn from_iter<I: IntoIterator<Item = Contig>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
