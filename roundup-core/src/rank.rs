use crate::error::DigestError;
use crate::post::PostRecord;
use std::cmp::Reverse;

/// Cutoff used when no explicit top-K is configured.
pub const DEFAULT_TOP_K: usize = 100;

/// Select the texts of the `top_k` posts with the highest reach.
///
/// Output is ordered by descending reach. The sort is stable, so posts with
/// equal reach keep their input order and the first one seen wins the tie.
/// Fewer than `top_k` posts are returned as-is; an empty input yields an
/// empty result.
pub fn rank_by_reach(posts: &[PostRecord], top_k: usize) -> Result<Vec<String>, DigestError> {
    check_top_k(top_k)?;

    let mut scored: Vec<(u64, &PostRecord)> =
        posts.iter().map(|post| (post.reach(), post)).collect();
    scored.sort_by_key(|(reach, _)| Reverse(*reach));

    Ok(scored
        .into_iter()
        .take(top_k)
        .map(|(_, post)| post.text().to_string())
        .collect())
}

pub(crate) fn check_top_k(top_k: usize) -> Result<(), DigestError> {
    if top_k == 0 {
        return Err(DigestError::InvalidConfig(
            "top_k must be a positive integer".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn post(text: &str, retweets: u64, favorites: u64) -> PostRecord {
        PostRecord::new(text, retweets, favorites, Utc::now())
    }

    fn reach_of(posts: &[PostRecord], text: &str) -> u64 {
        posts.iter().find(|p| p.text() == text).unwrap().reach()
    }

    #[test]
    fn orders_by_descending_reach() {
        let posts = vec![post("low", 1, 0), post("high", 10, 5), post("mid", 3, 3)];
        let ranked = rank_by_reach(&posts, 10).unwrap();
        assert_eq!(ranked, vec!["high", "mid", "low"]);
    }

    #[test]
    fn cuts_off_at_top_k() {
        let posts: Vec<_> = (0..10).map(|i| post(&format!("p{i}"), i, 0)).collect();
        let ranked = rank_by_reach(&posts, 3).unwrap();
        assert_eq!(ranked, vec!["p9", "p8", "p7"]);
    }

    #[test]
    fn short_input_is_returned_whole() {
        let posts = vec![post("a", 1, 1), post("b", 2, 2)];
        assert_eq!(rank_by_reach(&posts, 100).unwrap().len(), 2);
    }

    #[test]
    fn empty_input_yields_empty_output() {
        assert!(rank_by_reach(&[], 5).unwrap().is_empty());
    }

    #[test]
    fn ties_keep_input_order() {
        let posts = vec![
            post("first", 2, 3),
            post("big", 50, 0),
            post("second", 5, 0),
            post("third", 0, 5),
        ];
        let ranked = rank_by_reach(&posts, 3).unwrap();
        assert_eq!(ranked, vec!["big", "first", "second"]);
    }

    #[test]
    fn ranking_is_deterministic() {
        let posts: Vec<_> = (0..50)
            .map(|i| post(&format!("p{i}"), i % 7, (i * 3) % 5))
            .collect();
        assert_eq!(
            rank_by_reach(&posts, 20).unwrap(),
            rank_by_reach(&posts, 20).unwrap()
        );
    }

    #[test]
    fn returned_reach_dominates_unreturned() {
        let posts: Vec<_> = (0..40)
            .map(|i| post(&format!("p{i}"), (i * 13) % 11, (i * 7) % 9))
            .collect();
        let ranked = rank_by_reach(&posts, 15).unwrap();
        assert_eq!(ranked.len(), 15);

        let reaches: Vec<u64> = ranked.iter().map(|t| reach_of(&posts, t)).collect();
        assert!(reaches.windows(2).all(|w| w[0] >= w[1]));

        let floor = *reaches.last().unwrap();
        for p in posts.iter().filter(|p| !ranked.iter().any(|t| t == p.text())) {
            assert!(p.reach() <= floor);
        }
    }

    #[test]
    fn zero_top_k_is_rejected() {
        let err = rank_by_reach(&[post("a", 1, 1)], 0).unwrap_err();
        assert!(matches!(err, DigestError::InvalidConfig(_)));
    }
}
