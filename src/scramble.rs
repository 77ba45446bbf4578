use clap::ValueEnum;
use rand::Rng;
use serde::{Deserialize, Serialize};

const TURN_SUFFIXES: [&str; 3] = ["", "'", "2"];

#[derive(
    Debug, Copy, Clone, PartialEq, Eq, ValueEnum, strum_macros::Display, Serialize, Deserialize,
)]
pub enum PuzzleKind {
    #[strum(serialize = "2x2")]
    Cube2,
    #[strum(serialize = "3x3")]
    Cube3,
    #[strum(serialize = "4x4")]
    Cube4,
}

impl PuzzleKind {
    fn faces(&self) -> &'static [&'static str] {
        match self {
            PuzzleKind::Cube2 => &["R", "U", "F"],
            PuzzleKind::Cube3 => &["R", "L", "U", "D", "F", "B"],
            PuzzleKind::Cube4 => &["R", "L", "U", "D", "F", "B", "Rw", "Uw", "Fw"],
        }
    }

    fn scramble_length(&self) -> usize {
        match self {
            PuzzleKind::Cube2 => 9,
            PuzzleKind::Cube3 => 25,
            PuzzleKind::Cube4 => 40,
        }
    }
}

/// R/L turn the same axis, as do U/D and F/B; wide moves share the axis of
/// their face.
fn axis(face: &str) -> u8 {
    match face.as_bytes()[0] {
        b'R' | b'L' => 0,
        b'U' | b'D' => 1,
        _ => 2,
    }
}

/// Produces random-move scramble sequences for the configured puzzle.
///
/// Two consecutive moves never turn the same face, and no three consecutive
/// moves share an axis, so every move actually changes the cube state.
#[derive(Debug, Clone, Copy)]
pub struct ScrambleGenerator {
    puzzle: PuzzleKind,
}

impl ScrambleGenerator {
    pub fn new(puzzle: PuzzleKind) -> Self {
        Self { puzzle }
    }

    pub fn puzzle(&self) -> PuzzleKind {
        self.puzzle
    }

    pub fn generate(&self) -> String {
        self.generate_with(&mut rand::thread_rng())
    }

    pub fn generate_with<R: Rng>(&self, rng: &mut R) -> String {
        let faces = self.puzzle.faces();
        let mut moves: Vec<String> = Vec::with_capacity(self.puzzle.scramble_length());
        let mut last_face: Option<&str> = None;
        let mut last_axes: (Option<u8>, Option<u8>) = (None, None);

        while moves.len() < self.puzzle.scramble_length() {
            let face = faces[rng.gen_range(0..faces.len())];
            if last_face == Some(face) {
                continue;
            }
            let face_axis = axis(face);
            if last_axes == (Some(face_axis), Some(face_axis)) {
                continue;
            }

            let suffix = TURN_SUFFIXES[rng.gen_range(0..TURN_SUFFIXES.len())];
            moves.push(format!("{face}{suffix}"));
            last_axes = (last_axes.1, Some(face_axis));
            last_face = Some(face);
        }

        moves.join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn face_of(mv: &str) -> &str {
        mv.trim_end_matches(['\'', '2'])
    }

    #[test]
    fn test_scramble_length_per_puzzle() {
        let mut rng = StdRng::seed_from_u64(7);
        for (puzzle, expected) in [
            (PuzzleKind::Cube2, 9),
            (PuzzleKind::Cube3, 25),
            (PuzzleKind::Cube4, 40),
        ] {
            let scramble = ScrambleGenerator::new(puzzle).generate_with(&mut rng);
            assert_eq!(scramble.split_whitespace().count(), expected);
        }
    }

    #[test]
    fn test_no_consecutive_moves_on_same_face() {
        let mut rng = StdRng::seed_from_u64(42);
        let generator = ScrambleGenerator::new(PuzzleKind::Cube3);

        for _ in 0..50 {
            let scramble = generator.generate_with(&mut rng);
            let moves = scramble.split_whitespace().collect::<Vec<_>>();
            for pair in moves.windows(2) {
                assert_ne!(face_of(pair[0]), face_of(pair[1]), "in {scramble}");
            }
        }
    }

    #[test]
    fn test_no_three_moves_on_same_axis() {
        let mut rng = StdRng::seed_from_u64(1234);
        let generator = ScrambleGenerator::new(PuzzleKind::Cube3);

        for _ in 0..50 {
            let scramble = generator.generate_with(&mut rng);
            let axes = scramble
                .split_whitespace()
                .map(|mv| axis(face_of(mv)))
                .collect::<Vec<_>>();
            for triple in axes.windows(3) {
                assert!(
                    !(triple[0] == triple[1] && triple[1] == triple[2]),
                    "in {scramble}"
                );
            }
        }
    }

    #[test]
    fn test_moves_use_known_faces_and_suffixes() {
        let mut rng = StdRng::seed_from_u64(99);
        let scramble = ScrambleGenerator::new(PuzzleKind::Cube4).generate_with(&mut rng);

        for mv in scramble.split_whitespace() {
            let face = face_of(mv);
            assert!(PuzzleKind::Cube4.faces().contains(&face), "bad move {mv}");
            let suffix = &mv[face.len()..];
            assert!(TURN_SUFFIXES.contains(&suffix), "bad suffix in {mv}");
        }
    }

    #[test]
    fn test_puzzle_display_names() {
        assert_eq!(PuzzleKind::Cube2.to_string(), "2x2");
        assert_eq!(PuzzleKind::Cube3.to_string(), "3x3");
        assert_eq!(PuzzleKind::Cube4.to_string(), "4x4");
    }
}
