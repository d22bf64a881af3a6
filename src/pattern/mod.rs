//! Speech-like flap pattern generator: fills fixed-capacity arrays of
//! flap/break durations in randomized bursts, with longer pauses between
//! bursts, totalling at most fifteen seconds. Consumers feed the
//! durations to a scheduler; nothing here touches the wire protocol.
use rand_core::RngCore;

//==================================================================================Constants

/// Upper bound on generated entries. Must stay below 255 so the length
/// fits legacy 8-bit size fields.
pub const MAX_FLAPS: usize = 170;

/// Total time budget for one pattern (ms).
const TOTAL_DURATION_MS: u16 = 15_000;

const FLAP_MIN_MS: u16 = 50;
const FLAP_MAX_MS: u16 = 200;
const BREAK_MIN_MS: u16 = 50;
const BREAK_MAX_MS: u16 = 100;

/// Inter-burst pauses, like pauses in speech.
const PAUSE_MIN_MS: u16 = 250;
const PAUSE_MAX_MS: u16 = 600;

const BURST_MIN_FLAPS: u16 = 2;
const BURST_MAX_FLAPS: u16 = 6;

//==================================================================================Pattern

#[derive(Debug, Clone)]
/// A generated pattern: paired flap and break durations. A zero flap
/// duration marks a pause entry (break only).
pub struct FlapPattern {
    flaps: [u16; MAX_FLAPS],
    breaks: [u16; MAX_FLAPS],
    len: usize,
}

impl FlapPattern {
    /// Number of valid entries.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Flap durations (ms), pause entries included as zero.
    pub fn flaps(&self) -> &[u16] {
        &self.flaps[..self.len]
    }

    /// Break durations (ms), paired index-by-index with [`flaps`](Self::flaps).
    pub fn breaks(&self) -> &[u16] {
        &self.breaks[..self.len]
    }

    /// Total scheduled time across all entries (ms).
    pub fn total_duration_ms(&self) -> u32 {
        self.flaps()
            .iter()
            .chain(self.breaks())
            .map(|duration| u32::from(*duration))
            .sum()
    }
}

//==================================================================================Generator

fn random_between<R: RngCore>(rng: &mut R, min: u16, max: u16) -> u16 {
    min + (rng.next_u32() % u32::from(max - min + 1)) as u16
}

/// Generate up to fifteen seconds of speech-like flapping: bursts of two
/// to six flap/break pairs separated by longer pauses. Deterministic for
/// a given RNG state.
pub fn generate_flap_pattern<R: RngCore>(rng: &mut R) -> FlapPattern {
    let mut pattern = FlapPattern {
        flaps: [0; MAX_FLAPS],
        breaks: [0; MAX_FLAPS],
        len: 0,
    };
    let mut elapsed_ms: u16 = 0;

    while elapsed_ms < TOTAL_DURATION_MS && pattern.len < MAX_FLAPS {
        let flaps_in_burst = random_between(rng, BURST_MIN_FLAPS, BURST_MAX_FLAPS);

        for _ in 0..flaps_in_burst {
            if elapsed_ms >= TOTAL_DURATION_MS {
                break;
            }
            let flap_ms = random_between(rng, FLAP_MIN_MS, FLAP_MAX_MS);
            let break_ms = random_between(rng, BREAK_MIN_MS, BREAK_MAX_MS);

            if elapsed_ms + flap_ms + break_ms > TOTAL_DURATION_MS {
                break;
            }

            pattern.flaps[pattern.len] = flap_ms;
            pattern.breaks[pattern.len] = break_ms;
            elapsed_ms += flap_ms + break_ms;
            pattern.len += 1;
        }

        // Longer pause between bursts, like a breath between phrases.
        if elapsed_ms + PAUSE_MIN_MS < TOTAL_DURATION_MS && pattern.len < MAX_FLAPS {
            let pause_ms = random_between(rng, PAUSE_MIN_MS, PAUSE_MAX_MS);
            pattern.flaps[pattern.len] = 0;
            pattern.breaks[pattern.len] = pause_ms;
            elapsed_ms += pause_ms;
            pattern.len += 1;
        }
    }

    pattern
}
