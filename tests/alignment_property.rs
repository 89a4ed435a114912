use proptest::prelude::*;
use seq_engines::{AffineScoring, AlignmentEngine, AlignmentEngineBuilder};

const NEG_INF: i32 = i32::MIN / 4;

/// Full-table Gotoh oracle in the same score model as the engine:
/// a gap of length L costs `gap_open + (L-1) * gap_extend`.
fn full_affine_score(a: &[u8], b: &[u8], sc: &AffineScoring) -> i32 {
    let n = a.len();
    let m = b.len();
    let mut m_dp = vec![vec![NEG_INF; m + 1]; n + 1];
    let mut ix_dp = vec![vec![NEG_INF; m + 1]; n + 1];
    let mut iy_dp = vec![vec![NEG_INF; m + 1]; n + 1];

    m_dp[0][0] = 0;
    for j in 1..=m {
        iy_dp[0][j] = -sc.gap_open - (j as i32 - 1) * sc.gap_extend;
    }
    for i in 1..=n {
        ix_dp[i][0] = -sc.gap_open - (i as i32 - 1) * sc.gap_extend;
    }
    for i in 1..=n {
        for j in 1..=m {
            let pair = if a[i - 1] == b[j - 1] {
                sc.match_score
            } else {
                sc.mismatch_score
            };
            m_dp[i][j] = m_dp[i - 1][j - 1]
                .max(ix_dp[i - 1][j - 1])
                .max(iy_dp[i - 1][j - 1])
                + pair;
            ix_dp[i][j] = (m_dp[i - 1][j] - sc.gap_open).max(ix_dp[i - 1][j] - sc.gap_extend);
            iy_dp[i][j] = (m_dp[i][j - 1] - sc.gap_open).max(iy_dp[i][j - 1] - sc.gap_extend);
        }
    }
    m_dp[n][m].max(ix_dp[n][m]).max(iy_dp[n][m])
}

/// Same recurrence in i64. Agreement with the i32 engine proves no
/// intermediate value wrapped.
fn full_affine_score_i64(a: &[u8], b: &[u8], sc: &AffineScoring) -> i64 {
    let neg_inf = NEG_INF as i64;
    let (go, ge) = (sc.gap_open as i64, sc.gap_extend as i64);
    let n = a.len();
    let m = b.len();
    let mut m_dp = vec![vec![neg_inf; m + 1]; n + 1];
    let mut ix_dp = vec![vec![neg_inf; m + 1]; n + 1];
    let mut iy_dp = vec![vec![neg_inf; m + 1]; n + 1];

    m_dp[0][0] = 0;
    for j in 1..=m {
        iy_dp[0][j] = -go - (j as i64 - 1) * ge;
    }
    for i in 1..=n {
        ix_dp[i][0] = -go - (i as i64 - 1) * ge;
    }
    for i in 1..=n {
        for j in 1..=m {
            let pair = if a[i - 1] == b[j - 1] {
                sc.match_score as i64
            } else {
                sc.mismatch_score as i64
            };
            m_dp[i][j] = m_dp[i - 1][j - 1]
                .max(ix_dp[i - 1][j - 1])
                .max(iy_dp[i - 1][j - 1])
                + pair;
            ix_dp[i][j] = (m_dp[i - 1][j] - go).max(ix_dp[i - 1][j] - ge);
            iy_dp[i][j] = (m_dp[i][j - 1] - go).max(iy_dp[i][j - 1] - ge);
        }
    }
    m_dp[n][m].max(ix_dp[n][m]).max(iy_dp[n][m])
}

proptest! {
    #[test]
    fn rolling_rows_match_full_table(
        a in "[ACGT]{0,10}",
        b in "[ACGT]{0,10}",
        ms in 0i32..6,
        mm in -6i32..1,
        go in 0i32..10,
        ge in 0i32..5,
    ) {
        let sc = AffineScoring {
            match_score: ms,
            mismatch_score: mm,
            gap_open: go,
            gap_extend: ge,
        };
        let mut engine = AlignmentEngine::new(sc);
        let s = a.as_bytes();
        let t = b.as_bytes();
        prop_assert_eq!(engine.score(s, t), full_affine_score(s, t, &sc));
    }

    #[test]
    fn score_is_symmetric(a in "[ACGT]{0,10}", b in "[ACGT]{0,10}") {
        let mut engine = AlignmentEngine::default();
        let s = a.as_bytes();
        let t = b.as_bytes();
        prop_assert_eq!(engine.score(s, t), engine.score(t, s));
    }
}

#[test]
fn empty_against_run_is_one_gap() {
    let mut engine = AlignmentEngineBuilder::new()
        .match_score(1)
        .mismatch_score(-1)
        .gap_open(2)
        .gap_extend(1)
        .build();
    // One open plus three extensions.
    assert_eq!(engine.score(b"", b"AAAA"), -5);
    assert_eq!(engine.score(b"AAAA", b""), -5);
    assert_eq!(engine.score(b"", b""), 0);
}

#[test]
fn perfect_match_with_default_scoring() {
    let mut engine = AlignmentEngine::default();
    assert_eq!(engine.score(b"ACGT", b"ACGT"), 4 * 3);
}

#[test]
fn homopolymer_contraction_prefers_one_gap() {
    // Deleting three symbols in one run: open once, extend twice.
    let mut engine = AlignmentEngineBuilder::new()
        .match_score(2)
        .mismatch_score(-2)
        .gap_open(5)
        .gap_extend(1)
        .build();
    assert_eq!(engine.score(b"AAAAAA", b"AAA"), 3 * 2 - (5 + 2));
}

/// Long all-mismatch and all-gap inputs drive scores far below zero and
/// push the unreachable-state sentinel through hundreds of subtractions.
/// The i64 oracle agreeing with the i32 engine means nothing wrapped.
#[test]
fn sentinel_headroom_under_long_inputs() {
    let sc = AffineScoring {
        match_score: 1,
        mismatch_score: -100,
        gap_open: 1000,
        gap_extend: 100,
    };
    let mut engine = AlignmentEngine::new(sc);

    let a = vec![b'A'; 400];
    let b = vec![b'C'; 300];
    let got = engine.score(&a, &b) as i64;
    assert_eq!(got, full_affine_score_i64(&a, &b, &sc));

    let empty: &[u8] = &[];
    let got = engine.score(empty, &b) as i64;
    assert_eq!(got, -(1000 + 299 * 100));
    assert_eq!(got, full_affine_score_i64(empty, &b, &sc));
}
