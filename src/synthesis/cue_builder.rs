/*!
 * Turns transcription segments into timed subtitle cues.
 *
 * A segment becomes a single cue when its text fits in `max_lines` lines of
 * `max_chars_per_line`. Longer segments are halved recursively at the sentence
 * end, clause end or token boundary closest to the middle of the text, and the
 * segment's time span is divided at each cut, from word timestamps when they
 * are available and by character share otherwise.
 */

use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::app_config::ProcessingConfig;
use crate::models::{seconds_to_ms, Subtitle, TranscriptionSegment, Word};

use super::wrapper::{char_len, greedy_line_count, joined_len, tokenize, wrap};

/// Token ending a sentence, allowing trailing quotes and brackets
static SENTENCE_END_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"[.!?…]["'”’)\]]*$"#).expect("Invalid sentence end regex")
});

/// Token ending a clause
static CLAUSE_END_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"[,;:—–]["'”’)\]]*$"#).expect("Invalid clause end regex")
});

// A run of tokens with the time span and words that belong to it
struct Piece<'a> {
    tokens: &'a [&'a str],
    start_ms: u64,
    end_ms: u64,
    words: &'a [&'a Word],
}

/// Builds subtitle cues from transcription segments
pub struct CueBuilder<'a> {
    config: &'a ProcessingConfig,
}

impl<'a> CueBuilder<'a> {
    pub fn new(config: &'a ProcessingConfig) -> Self {
        Self { config }
    }

    /// Build cues for all segments, indexed 1..N in output order
    pub fn build(&self, segments: &[TranscriptionSegment]) -> Vec<Subtitle> {
        let mut cues = Vec::with_capacity(segments.len());

        for segment in segments {
            let before = cues.len();
            self.build_segment(segment, &mut cues);

            match cues.len() - before {
                0 => debug!("Segment {} is blank, no cue produced", segment.id),
                1 => {}
                n => debug!("Segment {} split into {} cues", segment.id, n),
            }
        }

        for (i, cue) in cues.iter_mut().enumerate() {
            cue.index = i + 1;
        }
        cues
    }

    fn build_segment(&self, segment: &TranscriptionSegment, cues: &mut Vec<Subtitle>) {
        let tokens = tokenize(&segment.text);
        if tokens.is_empty() {
            return;
        }

        let words: Vec<&Word> = segment
            .words
            .iter()
            .filter(|w| !w.text.trim().is_empty() && w.start.is_finite() && w.end.is_finite())
            .collect();

        let start_ms = seconds_to_ms(segment.start);
        let end_ms = seconds_to_ms(segment.end).max(start_ms);

        let mut pieces = Vec::new();
        self.split_piece(
            Piece {
                tokens: &tokens,
                start_ms,
                end_ms,
                words: &words,
            },
            &mut pieces,
        );

        for piece in pieces {
            let text = piece.tokens.join(" ");
            let lines = wrap(&text, self.config.max_chars_per_line, self.config.max_lines);
            cues.push(Subtitle::new(0, piece.start_ms, piece.end_ms, text, lines));
        }
    }

    fn fits(&self, tokens: &[&str]) -> bool {
        greedy_line_count(tokens, self.config.max_chars_per_line.max(1)) <= self.config.max_lines.max(1)
    }

    fn split_piece<'p>(&self, piece: Piece<'p>, out: &mut Vec<Piece<'p>>) {
        if piece.tokens.len() <= 1 || self.fits(piece.tokens) {
            out.push(piece);
            return;
        }

        let boundary = choose_boundary(piece.tokens);
        let (left, right) = divide(piece, boundary);
        self.split_piece(left, out);
        self.split_piece(right, out);
    }
}

/// Build cues for `segments` with `config`
pub fn build(segments: &[TranscriptionSegment], config: &ProcessingConfig) -> Vec<Subtitle> {
    CueBuilder::new(config).build(segments)
}

/// Pick the token boundary to cut at, as the number of tokens on the left.
///
/// Sentence ends win over clause ends, which win over plain boundaries; within
/// the winning class the boundary closest to the character midpoint is used,
/// the earliest one on ties. Requires at least two tokens.
pub fn choose_boundary(tokens: &[&str]) -> usize {
    let total = joined_len(tokens) as i64;
    let distance = |boundary: &usize| (2 * joined_len(&tokens[..*boundary]) as i64 - total).abs();

    let boundaries = 1..tokens.len();
    let ending_with = |regex: &Regex| -> Vec<usize> {
        boundaries
            .clone()
            .filter(|&b| regex.is_match(tokens[b - 1]))
            .collect()
    };

    let sentence_ends = ending_with(&SENTENCE_END_REGEX);
    let clause_ends = ending_with(&CLAUSE_END_REGEX);
    let candidates: Vec<usize> = if !sentence_ends.is_empty() {
        sentence_ends
    } else if !clause_ends.is_empty() {
        clause_ends
    } else {
        boundaries.collect()
    };

    candidates.into_iter().min_by_key(distance).unwrap_or(1)
}

// Cut a piece after `boundary` tokens, dividing time and words between halves
fn divide(piece: Piece<'_>, boundary: usize) -> (Piece<'_>, Piece<'_>) {
    let (left_tokens, right_tokens) = piece.tokens.split_at(boundary);
    let left_len = joined_len(left_tokens);
    let right_len = joined_len(right_tokens);

    let word_split = split_words(piece.words, left_len, joined_len(piece.tokens));
    let (left_words, right_words) = piece.words.split_at(word_split);

    let (left_end, right_start) = if !left_words.is_empty() && !right_words.is_empty() {
        let left_end = clamp_ms(left_words[left_words.len() - 1].end, piece.start_ms, piece.end_ms);
        let right_start = clamp_ms(right_words[0].start, piece.start_ms, piece.end_ms);
        (left_end, right_start.max(left_end))
    } else {
        let span = (piece.end_ms - piece.start_ms) as u128;
        let share = span * left_len as u128 / (left_len + right_len).max(1) as u128;
        let cut = piece.start_ms + share as u64;
        (cut, cut)
    };

    (
        Piece {
            tokens: left_tokens,
            start_ms: piece.start_ms,
            end_ms: left_end,
            words: left_words,
        },
        Piece {
            tokens: right_tokens,
            start_ms: right_start,
            end_ms: piece.end_ms,
            words: right_words,
        },
    )
}

/// Number of words that fall before character offset `split_offset`.
///
/// Words are laid out as if joined with single spaces, stretched to the length
/// of the piece text, and assigned by the position of their midpoint.
fn split_words(words: &[&Word], split_offset: usize, text_len: usize) -> usize {
    if words.is_empty() {
        return 0;
    }

    let lengths: Vec<usize> = words.iter().map(|w| char_len(w.text.trim())).collect();
    let words_len = lengths.iter().sum::<usize>() + lengths.len() - 1;
    let scale = text_len as f64 / words_len.max(1) as f64;

    let mut offset = 0usize;
    let mut before = 0;
    for len in lengths {
        let midpoint = (offset as f64 + len as f64 / 2.0) * scale;
        if midpoint >= split_offset as f64 {
            break;
        }
        before += 1;
        offset += len + 1;
    }
    before
}

fn clamp_ms(seconds: f64, start_ms: u64, end_ms: u64) -> u64 {
    seconds_to_ms(seconds).clamp(start_ms, end_ms)
}
