//! Chord-progression summarization.
//!
//! Each section's chords are reduced to a canonical cycle: consecutive
//! duplicates collapse, then the sequence is cut to its shortest repeating
//! unit. Sections sharing a cycle share one [`Progression`].

use std::collections::HashMap;

use songsmith_model::project::{pattern_of, Progression, ProgressionChord, Section};
use songsmith_model::theory::{chord_role, Chord, ChordQuality, Key};

use crate::error::SummarizeError;
use crate::ids::IdAllocator;

/// Drop consecutive repeats: `C C G G C` becomes `C G C`.
pub fn collapse_repeats<T: PartialEq + Clone>(seq: &[T]) -> Vec<T> {
    let mut out: Vec<T> = Vec::with_capacity(seq.len());
    for item in seq {
        if out.last() != Some(item) {
            out.push(item.clone());
        }
    }
    out
}

/// Shortest prefix that, repeated, covers the whole sequence.
///
/// A cycle must repeat at least twice; `C G C G C` reduces to `C G` while
/// `C G F` stays as it is.
pub fn shortest_cycle<T: PartialEq>(seq: &[T]) -> &[T] {
    let n = seq.len();
    for period in 1..=n / 2 {
        if (period..n).all(|i| seq[i] == seq[i % period]) {
            return &seq[..period];
        }
    }
    seq
}

/// Canonical chord cycle of one section.
pub fn section_cycle(section: &Section) -> Vec<(u8, ChordQuality)> {
    let chords: Vec<_> = section.chords.iter().map(|c| (c.root, c.quality)).collect();
    let collapsed = collapse_repeats(&chords);
    shortest_cycle(&collapsed).to_vec()
}

/// Group sections by chord cycle into named progressions.
///
/// Progressions appear in order of first use. A progression is named after
/// the first section that uses it, with a number appended when that name is
/// already taken.
pub fn summarize_progressions(
    sections: &[Section],
    key: &Key,
    max_progressions: usize,
    ids: &mut IdAllocator,
) -> Result<Vec<Progression>, SummarizeError> {
    let mut progressions: Vec<Progression> = Vec::new();
    let mut by_cycle: HashMap<Vec<(u8, ChordQuality)>, usize> = HashMap::new();
    let mut name_counts: HashMap<&'static str, usize> = HashMap::new();

    for section in sections {
        let cycle = section_cycle(section);
        if cycle.is_empty() {
            continue;
        }

        if let Some(&index) = by_cycle.get(&cycle) {
            let progression = &mut progressions[index];
            progression.section_ids.push(section.id.clone());
            progression.usage_count += 1;
            continue;
        }

        if progressions.len() == max_progressions {
            return Err(SummarizeError::TooManyProgressions {
                found: progressions.len() + 1,
                max: max_progressions,
            });
        }

        let title = section.section_type.title();
        let count = name_counts.entry(title).or_insert(0);
        *count += 1;
        let name = if *count == 1 {
            format!("{} progression", title)
        } else {
            format!("{} progression {}", title, count)
        };

        let chords: Vec<ProgressionChord> = cycle
            .iter()
            .map(|&(root, quality)| {
                let role = chord_role(root, quality, key);
                ProgressionChord {
                    symbol: Chord::new(root, quality).symbol(),
                    roman_numeral: role.roman_numeral.to_string(),
                    function: role.function,
                }
            })
            .collect();

        by_cycle.insert(cycle, progressions.len());
        progressions.push(Progression {
            id: ids.next_id("prg"),
            name,
            pattern: pattern_of(&chords),
            chords,
            usage_count: 1,
            section_ids: vec![section.id.clone()],
        });
    }

    Ok(progressions)
}
