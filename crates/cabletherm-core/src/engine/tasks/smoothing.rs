/// Replaces the value of each short point by the mean of its nearest full-length neighbours.
///
/// With a full-length neighbour on one side only, that neighbour's value is used; with none
/// the point keeps its own value. Neighbours are always read from `input`.
///
/// Short points sit at segment ends, so two of them can be adjacent where one segment's
/// remainder meets the next segment's single-point run. Taking the immediate neighbour there
/// would average one short point's value into the other, so the search skips over short
/// points to the nearest full-length one on each side.
pub fn smooth_short_points(input: &[f64], short: &[bool], output: &mut [f64]) {
    debug_assert_eq!(input.len(), short.len());
    debug_assert_eq!(input.len(), output.len());

    for (i, out) in output.iter_mut().enumerate() {
        if !short[i] {
            *out = input[i];
            continue;
        }
        let before = (0..i).rev().find(|&j| !short[j]).map(|j| input[j]);
        let after = (i + 1..input.len()).find(|&j| !short[j]).map(|j| input[j]);
        *out = match (before, after) {
            (Some(a), Some(b)) => 0.5 * (a + b),
            (Some(v), None) | (None, Some(v)) => v,
            (None, None) => input[i],
        };
    }
}
