//! Move scoring and the power-phrase bonus.

/// Points for locking a unit of `size` cells that cleared `lines` rows,
/// given that the previous lock cleared `prev_lines`.
pub fn move_score(size: usize, lines: u32, prev_lines: u32) -> i64 {
    let lines = lines as i64;
    let points = size as i64 + 100 * (1 + lines) * lines / 2;
    let line_bonus = if prev_lines > 1 {
        (prev_lines as i64 - 1) * points / 10
    } else {
        0
    };
    points + line_bonus
}

/// Split a comma-separated phrase list. Empty input yields no phrases.
pub fn parse_phrase_list(list: &str) -> Vec<String> {
    if list.is_empty() {
        return Vec::new();
    }
    list.split(',').map(str::to_string).collect()
}

/// Occurrences of `phrase` in `solution`, overlaps included. Both are case-folded.
pub fn phrase_reps(solution: &str, phrase: &str) -> usize {
    let solution = solution.to_lowercase();
    let phrase = phrase.to_lowercase();
    if phrase.is_empty() {
        return 0;
    }
    let mut reps = 0;
    let mut start = 0;
    while let Some(pos) = solution[start..].find(&phrase) {
        reps += 1;
        start += pos;
        start += solution[start..].chars().next().map_or(1, char::len_utf8);
    }
    reps
}

/// Bonus for every phrase appearing in `solution`: `2 * len * reps`, plus 300
/// for each phrase used at least once.
pub fn power_score(solution: &str, phrases: &[String]) -> i64 {
    phrases
        .iter()
        .map(|phrase| {
            let reps = phrase_reps(solution, phrase) as i64;
            let bonus = if reps > 0 { 300 } else { 0 };
            2 * phrase.chars().count() as i64 * reps + bonus
        })
        .sum()
}

/// Total phrase occurrences across all phrases.
pub fn power_count(solution: &str, phrases: &[String]) -> usize {
    phrases
        .iter()
        .map(|phrase| phrase_reps(solution, phrase))
        .sum()
}
