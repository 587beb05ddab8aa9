use super::*;

// =============================================================================
// RandomIdentity
// =============================================================================

#[test]
fn random_id_is_32_hex_chars() {
    let identity = RandomIdentity::new("https://avatars.test").generate(ProviderKind::Google).unwrap();
    assert_eq!(identity.id.len(), 32);
    assert!(identity.id.chars().all(|c| c.is_ascii_hexdigit()));
}

#[test]
fn random_ids_differ_between_calls() {
    let generator = RandomIdentity::new("https://avatars.test");
    let a = generator.generate(ProviderKind::Discord).unwrap();
    let b = generator.generate(ProviderKind::Discord).unwrap();
    assert_ne!(a.id, b.id);
}

#[test]
fn random_username_has_explorer_prefix_and_numeric_suffix() {
    let identity = RandomIdentity::new("https://avatars.test").generate(ProviderKind::Wallet).unwrap();
    let suffix = identity.username.strip_prefix("Explorer").unwrap();
    let n: u32 = suffix.parse().unwrap();
    assert!(USERNAME_SUFFIXES.contains(&n));
}

#[test]
fn fresh_suffix_redraws_on_repeat() {
    let mut draws = [5000, 5000, 6000].into_iter();
    assert_eq!(fresh_suffix(5000, || draws.next().unwrap()), 6000);
}

#[test]
fn fresh_suffix_accepts_first_distinct_draw() {
    assert_eq!(fresh_suffix(0, || 4242), 4242);
}

#[test]
fn consecutive_random_usernames_differ() {
    let generator = RandomIdentity::new("https://avatars.test");
    let mut previous = generator.generate(ProviderKind::Google).unwrap().username;
    for _ in 0..200 {
        let next = generator.generate(ProviderKind::Google).unwrap().username;
        assert_ne!(next, previous);
        previous = next;
    }
}

#[test]
fn random_avatar_is_seeded_by_id() {
    let identity = RandomIdentity::new("https://avatars.test/").generate(ProviderKind::Twitter).unwrap();
    assert_eq!(identity.avatar, Some(format!("https://avatars.test?seed={}", identity.id)));
}

// =============================================================================
// SequentialIdentity
// =============================================================================

#[test]
fn sequential_counts_up_from_one() {
    let generator = SequentialIdentity::new("t");
    let a = generator.generate(ProviderKind::Discord).unwrap();
    let b = generator.generate(ProviderKind::Google).unwrap();
    assert_eq!(a.id, "t-1");
    assert_eq!(a.username, "discord-traveler-1");
    assert_eq!(b.id, "t-2");
    assert_eq!(b.username, "google-traveler-2");
}

#[test]
fn avatar_url_trims_trailing_slash() {
    assert_eq!(avatar_url("https://a.test/svg/", "x1"), "https://a.test/svg?seed=x1");
}
