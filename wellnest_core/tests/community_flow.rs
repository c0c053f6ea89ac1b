use std::time::{Duration, Instant};

use chrono::NaiveTime;
use pretty_assertions::assert_eq;
use wellnest_core::community::{BackOutcome, FeedViewMode, PostDraft};
use wellnest_core::models::PostId;
use wellnest_core::seed;
use wellnest_core::CommunityFeed;

fn feed() -> CommunityFeed {
    CommunityFeed::from_seed(Duration::from_secs(2))
}

fn at(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).expect("valid time")
}

fn emojis_and_users(feed: &CommunityFeed, id: PostId) -> Vec<(String, Vec<String>)> {
    let post = feed.post(id).expect("post");
    feed.merged_reactions(post)
        .into_iter()
        .map(|reaction| {
            (
                reaction.emoji,
                reaction.users.into_iter().map(|user| user.name).collect(),
            )
        })
        .collect()
}

#[test]
fn whitespace_comment_leaves_state_untouched() {
    let mut feed = feed();
    feed.set_comment_draft("   ");
    assert!(!feed.add_comment_at(PostId(1), at(9, 5)));
    assert!(feed.overlay_comments(PostId(1)).is_empty());
    assert_eq!(feed.comment_draft(), "   ");
}

#[test]
fn comments_merge_seed_first_then_overlay() {
    let mut feed = feed();
    feed.set_comment_draft("저도 같이 가요!");
    assert!(feed.add_comment_at(PostId(1), at(14, 7)));
    assert_eq!(feed.comment_draft(), "");

    let post = feed.post(PostId(1)).expect("post");
    let merged = feed.merged_comments(post);
    assert_eq!(merged.len(), 3);
    assert_eq!(merged[..2].to_vec(), post.comments);
    assert_eq!(merged[2].text, "저도 같이 가요!");
    assert_eq!(merged[2].timestamp, "14:07");
    assert_eq!(merged[2].author.name, seed::CURRENT_USER_NAME);
}

#[test]
fn repeated_reaction_is_idempotent() {
    let mut feed = feed();
    let now = Instant::now();
    feed.add_reaction_at("❤️", PostId(4), now);
    feed.add_reaction_at("❤️", PostId(4), now + Duration::from_millis(300));

    assert_eq!(
        emojis_and_users(&feed, PostId(4)),
        vec![("❤️".to_string(), vec![seed::CURRENT_USER_NAME.to_string()])]
    );
}

#[test]
fn distinct_reactions_keep_insertion_order() {
    let mut feed = feed();
    let now = Instant::now();
    feed.add_reaction_at("👍", PostId(4), now);
    feed.add_reaction_at("❤️", PostId(4), now);

    let overlay: Vec<&str> = feed
        .overlay_reactions(PostId(4))
        .iter()
        .map(|reaction| reaction.emoji.as_str())
        .collect();
    assert_eq!(overlay, vec!["👍", "❤️"]);
}

#[test]
fn overlay_reactions_append_to_seed_groups() {
    let mut feed = feed();
    feed.add_reaction_at("😊", PostId(2), Instant::now());
    feed.add_reaction_at("🔥", PostId(2), Instant::now());

    let me = seed::CURRENT_USER_NAME.to_string();
    assert_eq!(
        emojis_and_users(&feed, PostId(2)),
        vec![
            ("👍".to_string(), vec!["엄마".to_string(), "동생".to_string()]),
            ("😊".to_string(), vec!["동생".to_string(), me.clone()]),
            ("🔥".to_string(), vec![me]),
        ]
    );
}

#[test]
fn my_reactions_is_empty_without_interaction() {
    let mut feed = feed();
    feed.open_grid();
    feed.open_my_reactions();
    assert!(feed.my_reacted_posts().is_empty());
    assert!(feed.visible_posts().is_empty());
}

#[test]
fn my_reactions_lists_posts_touched_this_session() {
    let mut feed = feed();
    feed.add_reaction_at("🎉", PostId(3), Instant::now());
    feed.set_comment_draft("멋져요");
    feed.add_comment_at(PostId(1), at(8, 0));

    let ids: Vec<PostId> = feed.my_reacted_posts().iter().map(|post| post.id).collect();
    assert_eq!(ids, vec![PostId(1), PostId(3)]);
}

#[test]
fn view_modes_toggle_bottom_nav_and_filtering() {
    let mut feed = feed();
    feed.add_reaction_at("👏", PostId(2), Instant::now());
    assert!(feed.show_bottom_nav());
    assert_eq!(feed.visible_posts().len(), 4);

    feed.open_grid();
    assert!(!feed.show_bottom_nav());
    assert_eq!(feed.visible_posts().len(), 4);

    feed.open_my_reactions();
    assert!(!feed.show_bottom_nav());
    assert_eq!(feed.visible_posts().len(), 1);

    assert_eq!(feed.back(), BackOutcome::Stay);
    assert_eq!(feed.view_mode(), FeedViewMode::Grid);
    assert_eq!(feed.back(), BackOutcome::Stay);
    assert_eq!(feed.view_mode(), FeedViewMode::Feed);
    assert!(feed.show_bottom_nav());
    assert_eq!(feed.visible_posts().len(), 4);
    assert_eq!(feed.back(), BackOutcome::LeavePage);
}

#[test]
fn reacting_closes_the_picker_and_restarts_the_burst() {
    let mut feed = feed();
    let start = Instant::now();
    feed.toggle_emoji_picker(PostId(1));
    assert_eq!(feed.emoji_picker_target(), Some(PostId(1)));

    let first = feed.add_reaction_at("❤️", PostId(1), start);
    assert_eq!(feed.emoji_picker_target(), None);
    let second = feed.add_reaction_at("🔥", PostId(1), start + Duration::from_secs(1));

    assert!(!feed.expire_burst(first));
    assert_eq!(feed.burst().active(), Some("🔥"));
    assert!(feed.expire_burst(second));
    assert_eq!(feed.burst().active(), None);
}

#[test]
fn published_post_goes_first_with_fresh_id() {
    let mut feed = feed();
    let id = feed.publish(PostDraft {
        image: "https://example.com/walk.jpg".into(),
        caption: "오늘도 만보".into(),
        location: Some("한강공원".into()),
        ..PostDraft::default()
    });
    assert_eq!(id, PostId(5));
    let first = &feed.posts()[0];
    assert_eq!(first.id, id);
    assert_eq!(first.author.name, seed::CURRENT_USER_NAME);
    assert_eq!(first.location.as_deref(), Some("한강공원"));
}
