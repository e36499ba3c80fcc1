//! Coaching tips attached to each stage.

use rand::Rng;
use rand::seq::SliceRandom;

/// Lines sampled into each stage's notes.
pub const TIPS_PER_STAGE: usize = 3;

/// Fixed pool of coaching tips. Sampling never repeats a tip within one stage.
pub const COACHING_TIPS: &[&str] = &[
    "Drink a glass of water whenever a craving hits.",
    "Take a ten-minute walk after meals instead of lighting up.",
    "Keep your hands busy: a stress ball, a pen, or a snack of raw vegetables.",
    "Tell a friend or family member about this week's target.",
    "Avoid places and routines you associate with smoking.",
    "Practice slow breathing: in for four counts, out for six.",
    "Put the money you did not spend on cigarettes somewhere you can see it.",
    "Delay each cigarette by fifteen minutes; many cravings pass on their own.",
    "Get enough sleep. Tiredness makes cravings harder to resist.",
    "Write down why you want to quit and read it every morning.",
    "Cut back on coffee and alcohol, which often trigger the urge to smoke.",
    "Reward yourself at the end of the week for staying on target.",
];

/// Sample [`TIPS_PER_STAGE`] distinct tips, newline-joined. Order is random.
pub fn sample_notes<R: Rng + ?Sized>(rng: &mut R) -> String {
    COACHING_TIPS
        .choose_multiple(rng, TIPS_PER_STAGE)
        .copied()
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::HashSet;

    #[test]
    fn test_samples_distinct_tips_from_pool() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            let notes = sample_notes(&mut rng);
            let lines: Vec<&str> = notes.lines().collect();
            assert_eq!(lines.len(), TIPS_PER_STAGE);
            assert!(lines.iter().all(|l| COACHING_TIPS.contains(l)));
            let unique: HashSet<&str> = lines.iter().copied().collect();
            assert_eq!(unique.len(), TIPS_PER_STAGE);
        }
    }
}
