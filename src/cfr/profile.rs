//! Accumulated regrets and strategy weights per information set.
use crate::*;
use anyhow::Context;
use std::collections::BTreeMap;

/// Accumulated training state of one (information set, action) pair.
#[derive(Debug, Clone, Copy, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Memory {
    pub regret: Utility,
    pub weight: Probability,
}

/// One flattened profile entry, as written to disk.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
struct Record<E> {
    info: Info<E>,
    edge: E,
    regret: Utility,
    weight: Probability,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
struct Snapshot<E> {
    epochs: usize,
    records: Vec<Record<E>>,
}

/// Regrets and strategy weights for every visited information set.
///
/// The current policy comes from regret matching, the average policy from
/// normalized strategy weights. Both fall back to uniform over the legal
/// choices when an information set has nothing to go on.
#[derive(Debug, Clone)]
pub struct Profile<E> {
    epochs: usize,
    memory: BTreeMap<Info<E>, BTreeMap<E, Memory>>,
}

impl<E> Default for Profile<E> {
    fn default() -> Self {
        Self {
            epochs: 0,
            memory: BTreeMap::new(),
        }
    }
}

impl<E> Profile<E>
where
    E: Edge,
{
    pub fn epochs(&self) -> usize {
        self.epochs
    }
    pub fn advance(&mut self) {
        self.epochs += 1;
    }
    /// Number of information sets visited at least once.
    pub fn len(&self) -> usize {
        self.memory.len()
    }
    pub fn is_empty(&self) -> bool {
        self.memory.is_empty()
    }
    pub fn memory(&self, info: &Info<E>, edge: &E) -> Memory {
        self.memory
            .get(info)
            .and_then(|edges| edges.get(edge))
            .copied()
            .unwrap_or_default()
    }
    pub fn entry(&mut self, info: &Info<E>, edge: &E) -> &mut Memory {
        self.memory
            .entry(info.clone())
            .or_default()
            .entry(*edge)
            .or_default()
    }
    /// Regret matching over the legal choices.
    pub fn policy(&self, info: &Info<E>, choices: &[E]) -> Policy<E> {
        normalize(
            choices
                .iter()
                .map(|e| (*e, self.memory(info, e).regret))
                .collect(),
        )
    }
    /// Normalized accumulated strategy weights over the legal choices.
    pub fn average(&self, info: &Info<E>, choices: &[E]) -> Policy<E> {
        normalize(
            choices
                .iter()
                .map(|e| (*e, self.memory(info, e).weight))
                .collect(),
        )
    }
    /// The average policy of every visited information set.
    pub fn strategy(&self) -> Strategy<E> {
        Strategy::from(
            self.memory
                .iter()
                .map(|(info, edges)| {
                    let choices = edges.keys().copied().collect::<Vec<_>>();
                    (info.clone(), self.average(info, &choices))
                })
                .collect::<BTreeMap<_, _>>(),
        )
    }

    pub fn save(&self, path: &str) -> anyhow::Result<()> {
        let snapshot = Snapshot {
            epochs: self.epochs,
            records: self
                .memory
                .iter()
                .flat_map(|(info, edges)| {
                    edges.iter().map(move |(edge, memory)| Record {
                        info: info.clone(),
                        edge: *edge,
                        regret: memory.regret,
                        weight: memory.weight,
                    })
                })
                .collect(),
        };
        let file = std::fs::File::create(path).with_context(|| format!("create profile {}", path))?;
        serde_json::to_writer(std::io::BufWriter::new(file), &snapshot).context("write profile")?;
        log::info!("saved {} records to {}", snapshot.records.len(), path);
        Ok(())
    }

    pub fn load(path: &str) -> anyhow::Result<Self> {
        let file = std::fs::File::open(path).with_context(|| format!("open profile {}", path))?;
        let snapshot: Snapshot<E> =
            serde_json::from_reader(std::io::BufReader::new(file)).with_context(|| format!("parse profile {}", path))?;
        let mut profile = Self {
            epochs: snapshot.epochs,
            memory: BTreeMap::new(),
        };
        for record in snapshot.records {
            *profile.entry(&record.info, &record.edge) = Memory {
                regret: record.regret,
                weight: record.weight,
            };
        }
        log::info!("loaded {} information sets from {}", profile.len(), path);
        Ok(profile)
    }
}
