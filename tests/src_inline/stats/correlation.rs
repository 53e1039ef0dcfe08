use super::*;
use crate::test_support::{assert_close, scored_table};

#[test]
fn test_pearson() {
    assert_close(pearson(&[1.0, 2.0, 3.0], &[2.0, 4.0, 6.0]), 1.0);
    assert_close(pearson(&[1.0, 2.0, 3.0], &[3.0, 2.0, 1.0]), -1.0);
    assert!(pearson(&[1.0, 1.0], &[1.0, 2.0]).is_nan());
    assert!(pearson(&[1.0], &[1.0]).is_nan());
}

#[test]
fn test_rank_data_averages_ties() {
    assert_eq!(rank_data(&[10.0, 20.0, 10.0, 30.0]), vec![1.5, 3.0, 1.5, 4.0]);
}

#[test]
fn test_spearman_is_rank_based() {
    assert_close(spearman(&[1.0, 2.0, 3.0, 4.0], &[1.0, 4.0, 9.0, 16.0]), 1.0);
    assert_close(spearman(&[1.0, 2.0, 3.0], &[1.0, 3.0, 2.0]), 0.5);
}

#[test]
fn test_ndcg_perfect_and_reversed() {
    let truth = [3.0, 2.0, 1.0];
    assert_close(ndcg(&truth, &[0.9, 0.5, 0.1]), 1.0);

    let reversed = ndcg(&truth, &[0.1, 0.5, 0.9]);
    let dcg = 1.0 + 2.0 / 3f64.log2() + 3.0 / 2.0;
    let idcg = 3.0 + 2.0 / 3f64.log2() + 1.0 / 2.0;
    assert_close(reversed, dcg / idcg);
}

#[test]
fn test_ndcg_ties_share_gain() {
    let truth = [1.0, 0.0];
    let tied = ndcg(&truth, &[0.5, 0.5]);
    let dcg = 0.5 * (1.0 + 1.0 / 3f64.log2());
    assert_close(tied, dcg);
    assert_eq!(ndcg(&[0.0, 0.0], &[0.1, 0.2]), 0.0);
}

#[test]
fn test_correlation_by_rep_round_excludes_rounds() {
    let t = scored_table(&[
        (0, 0, 0.1, 0.1),
        (0, 0, 0.2, 0.2),
        (0, 1, 0.1, 0.3),
        (0, 1, 0.2, 0.2),
        (0, 1, 0.3, 0.1),
        (1, 1, 0.1, 0.1),
        (1, 1, 0.2, 0.2),
    ]);
    let by = correlation_by_rep_round(&t, CorrelationMethod::Pearson, &[0]);
    assert_eq!(by.len(), 2);
    assert_close(by[&(0, 1)], -1.0);
    assert_close(by[&(1, 1)], 1.0);

    let median = median_correlation_by_round(&t, CorrelationMethod::Pearson, &[]);
    assert_close(median[&0], 1.0);
    assert_close(median[&1], 0.0);
}
