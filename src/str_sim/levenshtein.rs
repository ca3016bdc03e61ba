use super::{strip_common, to_chars, CostModel, EmptyInputPolicy, PairwiseMetric};

/// Weighted Levenshtein distance: the minimum total cost of insertions, deletions and
/// substitutions turning `a` into `b`. The raw cost is returned, not a similarity.
///
/// Equal strings are at distance 0.0. When exactly one string is empty the result
/// follows the configured [`EmptyInputPolicy`] (0.0 by default).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct WeightedLevenshtein {
    costs: CostModel,
    empty_policy: EmptyInputPolicy,
}

impl WeightedLevenshtein {
    pub fn new(costs: CostModel) -> Self {
        Self {
            costs,
            empty_policy: EmptyInputPolicy::default(),
        }
    }

    pub fn with_empty_policy(mut self, policy: EmptyInputPolicy) -> Self {
        self.empty_policy = policy;
        self
    }

    pub fn costs(&self) -> &CostModel {
        &self.costs
    }

    /// Edit cost between two character sequences, without any of the string-level
    /// special cases.
    pub fn distance(&self, a: &[char], b: &[char]) -> f64 {
        // Matching affixes cost nothing and an optimal alignment always keeps them.
        let (a, b) = strip_common(a, b);
        let costs = &self.costs;

        if a.is_empty() {
            return repeated_cost(costs.insertion_cost(), b.len());
        }
        if b.is_empty() {
            return repeated_cost(costs.deletion_cost(), a.len());
        }

        // The row runs over the shorter sequence. Swapping the strings turns
        // insertions into deletions and vice versa.
        if a.len() < b.len() {
            rolling_row_distance(b, a, &costs.transposed())
        } else {
            rolling_row_distance(a, b, costs)
        }
    }
}

#[inline]
fn repeated_cost(cost: f64, n: usize) -> f64 {
    // Summed rather than multiplied, the same way the table borders accumulate.
    (0..n).fold(0., |acc, _| acc + cost)
}

/// Classic DP over a single buffer of `b.len() + 1` cells.
fn rolling_row_distance(a: &[char], b: &[char], costs: &CostModel) -> f64 {
    let (ins, del, sub) = (
        costs.insertion_cost(),
        costs.deletion_cost(),
        costs.substitution_cost(),
    );

    // Row 0: cumulative insertions
    let mut buffer: Vec<f64> = Vec::with_capacity(b.len() + 1);
    buffer.push(0.);
    for j in 0..b.len() {
        buffer.push(buffer[j] + ins);
    }

    // buffer[j] = cell to the left once updated, cell above before
    // diag = the cell in the upper left
    for c1 in a {
        let mut diag = buffer[0];
        buffer[0] = diag + del;
        for (j, c2) in b.iter().enumerate() {
            let above = buffer[j + 1];
            let replace = if c1 == c2 { diag } else { diag + sub };
            buffer[j + 1] = (above + del).min(buffer[j] + ins).min(replace);
            diag = above;
        }
    }
    buffer[b.len()]
}

impl PairwiseMetric for WeightedLevenshtein {
    fn score(&self, a: &str, b: &str) -> f64 {
        if a == b {
            return 0.;
        }
        if (a.is_empty() || b.is_empty()) && self.empty_policy == EmptyInputPolicy::Sentinel {
            return 0.;
        }
        self.distance(&to_chars(a), &to_chars(b))
    }
}

/// Weighted Levenshtein distance between two optional strings. See [`WeightedLevenshtein`].
#[inline]
pub fn weighted_levenshtein(a: Option<&str>, b: Option<&str>, costs: &CostModel) -> f64 {
    WeightedLevenshtein::new(*costs).score_opt(a, b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;

    fn costs(ins: f64, del: f64, sub: f64) -> CostModel {
        CostModel::new(ins, del, sub).unwrap()
    }

    /// Full (len_a + 1) x (len_b + 1) table, no shortcuts.
    fn full_table_distance(a: &[char], b: &[char], costs: &CostModel) -> f64 {
        let mut table = vec![vec![0f64; b.len() + 1]; a.len() + 1];
        for i in 1..=a.len() {
            table[i][0] = table[i - 1][0] + costs.deletion_cost();
        }
        for j in 1..=b.len() {
            table[0][j] = table[0][j - 1] + costs.insertion_cost();
        }
        for i in 1..=a.len() {
            for j in 1..=b.len() {
                let sub = if a[i - 1] == b[j - 1] {
                    0.
                } else {
                    costs.substitution_cost()
                };
                table[i][j] = (table[i - 1][j] + costs.deletion_cost())
                    .min(table[i][j - 1] + costs.insertion_cost())
                    .min(table[i - 1][j - 1] + sub);
            }
        }
        table[a.len()][b.len()]
    }

    fn random_word(rng: &mut ChaCha8Rng, max_len: usize) -> String {
        let len = rng.gen_range(0..=max_len);
        (0..len).map(|_| rng.gen_range('a'..='d')).collect()
    }

    #[test]
    fn test_kitten_sitting() {
        let d = weighted_levenshtein(Some("kitten"), Some("sitting"), &CostModel::default());
        assert_eq!(d, 3.);
        assert_eq!(
            weighted_levenshtein(Some("flaw"), Some("lawn"), &CostModel::default()),
            2.
        );
    }

    #[test]
    fn test_weighted_costs() {
        let d = weighted_levenshtein(Some("kitten"), Some("sitting"), &costs(2., 1., 3.));
        assert_eq!(d, 8.);
        let d = weighted_levenshtein(Some("kitten"), Some("sitting"), &costs(1., 1., 0.5));
        assert_eq!(d, 2.);
        // Substituting is dearer than deleting then inserting
        let d = weighted_levenshtein(Some("abc"), Some("xyz"), &costs(1., 1., 5.));
        assert_eq!(d, 6.);
        let d = weighted_levenshtein(Some("saturday"), Some("sunday"), &costs(1., 2., 1.));
        assert_eq!(d, 5.);
    }

    #[test]
    fn test_asymmetric_costs_follow_direction() {
        let c = costs(1., 10., 100.);
        // "ab" -> "abc" is one insertion, the reverse one deletion
        assert_eq!(weighted_levenshtein(Some("ab"), Some("abc"), &c), 1.);
        assert_eq!(weighted_levenshtein(Some("abc"), Some("ab"), &c), 10.);
        // Shorter first forces the transposed table
        assert_eq!(weighted_levenshtein(Some("xb"), Some("axbc"), &c), 2.);
        assert_eq!(weighted_levenshtein(Some("axbc"), Some("xb"), &c), 20.);
    }

    #[test]
    fn test_equal_strings_are_zero_distance() {
        assert_eq!(
            weighted_levenshtein(Some("same"), Some("same"), &CostModel::default()),
            0.
        );
        assert_eq!(weighted_levenshtein(Some(""), Some(""), &CostModel::default()), 0.);
    }

    #[test]
    fn test_absent_input_sentinel() {
        assert_eq!(weighted_levenshtein(None, Some("x"), &CostModel::default()), 0.);
        assert_eq!(weighted_levenshtein(Some("x"), None, &CostModel::default()), 0.);
        assert_eq!(weighted_levenshtein(None, None, &CostModel::default()), 0.);
    }

    #[test]
    fn test_empty_input_policy() {
        let sentinel = WeightedLevenshtein::default();
        assert_eq!(sentinel.score("", "x"), 0.);
        assert_eq!(sentinel.score("abc", ""), 0.);

        let edits = WeightedLevenshtein::new(costs(2., 3., 1.))
            .with_empty_policy(EmptyInputPolicy::EditCost);
        assert_eq!(edits.score("", "x"), 2.);
        assert_eq!(edits.score("abc", ""), 9.);
        assert_eq!(
            WeightedLevenshtein::default()
                .with_empty_policy(EmptyInputPolicy::EditCost)
                .score("", "x"),
            1.
        );
    }

    #[test]
    fn test_zero_substitution_cost_aligns_lengths() {
        let d = weighted_levenshtein(Some("abcd"), Some("wxyz"), &costs(1., 1., 0.));
        assert_eq!(d, 0.);
        let d = weighted_levenshtein(Some("abcd"), Some("wx"), &costs(1., 1., 0.));
        assert_eq!(d, 2.);
    }

    #[test]
    fn test_code_points_not_bytes() {
        // 'é' is two bytes but one substitution
        assert_eq!(
            weighted_levenshtein(Some("café"), Some("cafe"), &CostModel::default()),
            1.
        );
        assert_eq!(
            weighted_levenshtein(Some("日本語"), Some("日本人"), &CostModel::default()),
            1.
        );
    }

    #[test]
    fn test_rolling_row_matches_full_table() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let choices = [0., 0.5, 1., 2., 3., 7.];
        for _ in 0..2_000 {
            let a: Vec<char> = random_word(&mut rng, 12).chars().collect();
            let b: Vec<char> = random_word(&mut rng, 12).chars().collect();
            let c = costs(
                choices[rng.gen_range(0..choices.len())],
                choices[rng.gen_range(0..choices.len())],
                choices[rng.gen_range(0..choices.len())],
            );
            let engine = WeightedLevenshtein::new(c);
            assert_eq!(
                engine.distance(&a, &b),
                full_table_distance(&a, &b, &c),
                "{:?} vs {:?} under {:?}",
                a,
                b,
                c
            );
        }
    }

    #[test]
    fn test_unit_costs_match_rapidfuzz() {
        use rapidfuzz::distance::levenshtein;

        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..1_000 {
            let a = random_word(&mut rng, 20);
            let b = random_word(&mut rng, 20);
            if a == b || a.is_empty() || b.is_empty() {
                continue;
            }
            let expected = levenshtein::distance(a.chars(), b.chars()) as f64;
            assert_eq!(
                weighted_levenshtein(Some(a.as_str()), Some(b.as_str()), &CostModel::default()),
                expected
            );
        }
    }
}
