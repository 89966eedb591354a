/*!
 * Line wrapping for subtitle text.
 *
 * Text is broken only at whitespace. Tokens are packed greedily into lines of
 * at most `max_chars` characters; when that needs more than `max_lines` lines
 * the break points are rebalanced so the longest line is as short as possible.
 * Tokens longer than a line are never hyphenated and nothing is ever dropped:
 * joining the lines with single spaces gives back the token sequence.
 */

/// Length of a string in characters (Unicode scalar values)
pub fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Split text into whitespace-separated tokens
pub fn tokenize(text: &str) -> Vec<&str> {
    text.split_whitespace().collect()
}

/// Length of `tokens` joined with single spaces
pub fn joined_len(tokens: &[&str]) -> usize {
    if tokens.is_empty() {
        return 0;
    }
    tokens.iter().map(|t| char_len(t)).sum::<usize>() + tokens.len() - 1
}

/// Number of lines a greedy pack at `width` characters produces
pub fn greedy_line_count(tokens: &[&str], width: usize) -> usize {
    greedy_pack(tokens, width).len()
}

/// Wrap `text` into between 1 and `max_lines` lines.
///
/// Empty or whitespace-only text yields a single empty line.
pub fn wrap(text: &str, max_chars: usize, max_lines: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    let max_lines = max_lines.max(1);

    let tokens = tokenize(text);
    if tokens.is_empty() {
        return vec![String::new()];
    }

    let lines = greedy_pack(&tokens, max_chars);
    if lines.len() <= max_lines {
        return lines.iter().map(|line| line.join(" ")).collect();
    }

    balance(&tokens, max_lines)
}

// Greedy first-fit packing; an over-long token gets a line of its own
fn greedy_pack<'a>(tokens: &[&'a str], width: usize) -> Vec<Vec<&'a str>> {
    let mut lines: Vec<Vec<&str>> = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    let mut current_len = 0;

    for &token in tokens {
        let token_len = char_len(token);
        if current.is_empty() {
            current.push(token);
            current_len = token_len;
        } else if current_len + 1 + token_len <= width {
            current.push(token);
            current_len += 1 + token_len;
        } else {
            lines.push(std::mem::take(&mut current));
            current.push(token);
            current_len = token_len;
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// Partition tokens into exactly `line_count` lines (fewer only when there are
/// fewer tokens) minimising the longest line; ties take the earliest breaks.
fn balance(tokens: &[&str], line_count: usize) -> Vec<String> {
    let n = tokens.len();
    if line_count <= 1 || n <= 1 {
        return vec![tokens.join(" ")];
    }
    let line_count = line_count.min(n);

    // Smallest width at which the tokens still fit in `line_count` lines
    let mut low = tokens.iter().map(|t| char_len(t)).max().unwrap_or(0);
    let mut high = joined_len(tokens);
    while low < high {
        let mid = low + (high - low) / 2;
        if greedy_line_count(tokens, mid) <= line_count {
            high = mid;
        } else {
            low = mid + 1;
        }
    }
    let width = low;

    let mut lines = Vec::with_capacity(line_count);
    let mut start = 0;
    for line in 0..line_count - 1 {
        let slots_after = line_count - line - 1;
        let last_end = n - slots_after;

        // Shortest line that still leaves a feasible remainder
        let end = (start + 1..=last_end)
            .take_while(|&end| joined_len(&tokens[start..end]) <= width)
            .find(|&end| greedy_line_count(&tokens[end..], width) <= slots_after)
            .unwrap_or(start + 1);

        lines.push(tokens[start..end].join(" "));
        start = end;
    }
    lines.push(tokens[start..].join(" "));

    lines
}
