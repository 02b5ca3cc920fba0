use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::matcher::{Candidates, CustomNodes, MatchMode};
use crate::model::PrefKey;
use crate::store::PreferenceStore;
use tracing::debug;

pub fn load_patterns<S: PreferenceStore>(store: &S) -> Result<CustomNodes> {
    let raw = store.get(PrefKey::Custom.name())?;
    Ok(CustomNodes::from_preference(raw.as_deref()))
}

/// Whether a node is one of the user's custom nodes. With no patterns stored
/// the answer is always `false`.
pub fn is_custom_node<S: PreferenceStore>(
    store: &S,
    candidates: Candidates<'_>,
    mode: MatchMode,
) -> Result<bool> {
    let nodes = load_patterns(store)?;
    if nodes.is_empty() {
        return Ok(false);
    }
    let is_custom = nodes.matches(&candidates, mode);
    debug!(?candidates, %mode, is_custom, "custom node check");
    Ok(is_custom)
}

pub fn patterns<S: PreferenceStore>(store: &S) -> Result<CmdResult> {
    let nodes = load_patterns(store)?;
    let mut result = CmdResult::default().with_patterns(nodes.patterns().to_vec());
    if nodes.is_empty() {
        result.add_message(CmdMessage::info("No custom nodes configured"));
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matcher::Pattern;
    use crate::store::memory::fixtures::StoreFixture;
    use crate::store::memory::InMemoryStore;

    fn check(store: &InMemoryStore, a: &str, b: &str, c: &str, mode: MatchMode) -> bool {
        is_custom_node(store, Candidates::new(a, b, c), mode).unwrap()
    }

    #[test]
    fn unset_or_empty_preference_is_never_custom() {
        let unset = InMemoryStore::new();
        assert!(!check(&unset, "foo", "bar", "baz", MatchMode::Overwrite));
        assert!(!check(&unset, "", "", "", MatchMode::Accumulate));

        let empty = StoreFixture::new().with_custom_patterns("").store;
        assert!(!check(&empty, "foo", "bar", "baz", MatchMode::Overwrite));
    }

    #[test]
    fn reads_patterns_from_custom_preference() {
        let store = StoreFixture::new().with_custom_patterns("oo").store;
        assert!(check(&store, "foo", "bar", "baz", MatchMode::Overwrite));
        assert!(!check(&store, "qux", "bar", "baz", MatchMode::Overwrite));
    }

    #[test]
    fn mode_decides_multi_pattern_lists() {
        let store = StoreFixture::new().with_custom_patterns("foo,xyz").store;
        assert!(!check(&store, "foo", "bar", "baz", MatchMode::Overwrite));
        assert!(check(&store, "foo", "bar", "baz", MatchMode::Accumulate));
    }

    #[test]
    fn expired_patterns_are_ignored() {
        let store = StoreFixture::new()
            .with_expired_pref(PrefKey::Custom, "foo")
            .store;
        assert!(!check(&store, "foo", "bar", "baz", MatchMode::Overwrite));
    }

    #[test]
    fn patterns_lists_parsed_entries() {
        let store = StoreFixture::new().with_custom_patterns("a*b,foo").store;
        let result = patterns(&store).unwrap();
        assert_eq!(
            result.patterns,
            vec![
                Pattern::Wildcard(vec!["a".into(), "b".into()]),
                Pattern::Literal("foo".into())
            ]
        );
        assert!(result.messages.is_empty());
    }

    #[test]
    fn patterns_reports_empty_list() {
        let result = patterns(&InMemoryStore::new()).unwrap();
        assert!(result.patterns.is_empty());
        assert_eq!(result.messages.len(), 1);
    }
}
