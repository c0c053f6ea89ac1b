//! Community feed state.
//!
//! Seed posts are never modified. Comments and reactions the current user
//! adds are kept in per-post overlay lists and merged with the seed data at
//! read time, which keeps both the seed and the user's own activity easy to
//! tell apart (the "my reactions" view relies on that).

use std::collections::HashMap;
use std::time::{Duration, Instant};

use chrono::{Local, NaiveTime, Timelike};
use log::{debug, info, warn};

use crate::animation::{BurstTicket, ReactionBurst};
use crate::models::{Comment, Post, PostId, Reaction, UserRef};
use crate::seed;

pub const EMOJI_PALETTE: [&str; 6] = ["❤️", "👍", "😊", "🎉", "🔥", "👏"];
pub const DEFAULT_GROUP: &str = "우리가족";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FeedViewMode {
    /// Vertical swipe feed, one post at a time.
    #[default]
    Feed,
    /// Three-column overview of every post.
    Grid,
    /// Overview restricted to posts the current user interacted with.
    MyReactions,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackOutcome {
    Stay,
    LeavePage,
}

/// A post assembled by the upload flow, ready to be published to the feed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostDraft {
    pub image: String,
    pub caption: String,
    pub text_overlay: Option<String>,
    pub location: Option<String>,
    pub weather: Option<String>,
    pub time: Option<String>,
    pub health: Option<String>,
}

/// Display timestamp for a new comment: hour unpadded, minute padded.
pub fn format_comment_time(time: NaiveTime) -> String {
    format!("{}:{:02}", time.hour(), time.minute())
}

/// Seed comments first, then the overlay, each in insertion order.
pub fn merge_comments(seed: &[Comment], overlay: &[Comment]) -> Vec<Comment> {
    seed.iter().chain(overlay).cloned().collect()
}

/// Groups reactions by emoji in first-appearance order, seed before overlay.
/// User lists are concatenated as-is; duplicates across the two origins are
/// kept.
pub fn merge_reactions(seed: &[Reaction], overlay: &[Reaction]) -> Vec<Reaction> {
    let mut merged: Vec<Reaction> = Vec::new();
    for reaction in seed.iter().chain(overlay) {
        match merged.iter_mut().find(|r| r.emoji == reaction.emoji) {
            Some(existing) => existing.users.extend(reaction.users.iter().cloned()),
            None => merged.push(reaction.clone()),
        }
    }
    merged
}

#[derive(Debug, Clone)]
pub struct CommunityFeed {
    posts: Vec<Post>,
    current_user: UserRef,
    added_comments: HashMap<PostId, Vec<Comment>>,
    added_reactions: HashMap<PostId, Vec<Reaction>>,
    comment_draft: String,
    emoji_picker: Option<PostId>,
    view_mode: FeedViewMode,
    selected_group: String,
    selected_post: Option<PostId>,
    burst: ReactionBurst,
}

impl CommunityFeed {
    pub fn new(posts: Vec<Post>, current_user: UserRef, burst_duration: Duration) -> Self {
        Self {
            posts,
            current_user,
            added_comments: HashMap::new(),
            added_reactions: HashMap::new(),
            comment_draft: String::new(),
            emoji_picker: None,
            view_mode: FeedViewMode::Feed,
            selected_group: DEFAULT_GROUP.to_string(),
            selected_post: None,
            burst: ReactionBurst::new(burst_duration),
        }
    }

    pub fn from_seed(burst_duration: Duration) -> Self {
        Self::new(seed::posts(), seed::current_user(), burst_duration)
    }

    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    pub fn post(&self, id: PostId) -> Option<&Post> {
        self.posts.iter().find(|post| post.id == id)
    }

    pub fn current_user(&self) -> &UserRef {
        &self.current_user
    }

    // Comments

    pub fn comment_draft(&self) -> &str {
        &self.comment_draft
    }

    pub fn comment_draft_mut(&mut self) -> &mut String {
        &mut self.comment_draft
    }

    pub fn set_comment_draft(&mut self, text: impl Into<String>) {
        self.comment_draft = text.into();
    }

    pub fn add_comment(&mut self, post_id: PostId) -> bool {
        self.add_comment_at(post_id, Local::now().time())
    }

    /// Appends the current draft as a comment on `post_id`. Blank drafts are
    /// ignored and left in place.
    pub fn add_comment_at(&mut self, post_id: PostId, time: NaiveTime) -> bool {
        if self.comment_draft.trim().is_empty() {
            return false;
        }
        if self.post(post_id).is_none() {
            warn!("ignoring comment on unknown post {post_id}");
            return false;
        }
        let comment = Comment {
            author: self.current_user.clone(),
            text: std::mem::take(&mut self.comment_draft),
            timestamp: format_comment_time(time),
        };
        debug!("comment added to post {post_id} at {}", comment.timestamp);
        self.added_comments.entry(post_id).or_default().push(comment);
        true
    }

    pub fn overlay_comments(&self, post_id: PostId) -> &[Comment] {
        self.added_comments
            .get(&post_id)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn merged_comments(&self, post: &Post) -> Vec<Comment> {
        merge_comments(&post.comments, self.overlay_comments(post.id))
    }

    // Reactions

    pub fn add_reaction(&mut self, emoji: &str, post_id: PostId) -> BurstTicket {
        self.add_reaction_at(emoji, post_id, Instant::now())
    }

    /// Records the current user's reaction and replays the burst animation.
    /// Reacting twice with the same emoji leaves the overlay unchanged.
    pub fn add_reaction_at(&mut self, emoji: &str, post_id: PostId, now: Instant) -> BurstTicket {
        self.emoji_picker = None;
        let ticket = self.burst.trigger(emoji, now);

        let reactions = self.added_reactions.entry(post_id).or_default();
        match reactions.iter_mut().find(|r| r.emoji == emoji) {
            Some(existing) => {
                if !existing.has_user(&self.current_user.name) {
                    existing.users.push(self.current_user.clone());
                }
            }
            None => reactions.push(Reaction {
                emoji: emoji.to_string(),
                users: vec![self.current_user.clone()],
            }),
        }
        debug!("reaction {emoji} on post {post_id}");
        ticket
    }

    pub fn overlay_reactions(&self, post_id: PostId) -> &[Reaction] {
        self.added_reactions
            .get(&post_id)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn merged_reactions(&self, post: &Post) -> Vec<Reaction> {
        merge_reactions(&post.reactions, self.overlay_reactions(post.id))
    }

    pub fn reaction_count(&self, post: &Post) -> usize {
        self.merged_reactions(post)
            .iter()
            .map(|reaction| reaction.users.len())
            .sum()
    }

    /// Posts the current user commented on or reacted to in this session.
    /// Seed content is not consulted.
    pub fn my_reacted_posts(&self) -> Vec<&Post> {
        let me = self.current_user.name.as_str();
        self.posts
            .iter()
            .filter(|post| {
                let commented = self
                    .overlay_comments(post.id)
                    .iter()
                    .any(|comment| comment.author.name == me);
                let reacted = self
                    .overlay_reactions(post.id)
                    .iter()
                    .any(|reaction| reaction.has_user(me));
                commented || reacted
            })
            .collect()
    }

    pub fn burst(&self) -> &ReactionBurst {
        &self.burst
    }

    pub fn expire_burst(&mut self, ticket: BurstTicket) -> bool {
        self.burst.expire(ticket)
    }

    pub fn poll_burst(&mut self, now: Instant) {
        self.burst.poll(now);
    }

    // Emoji picker and reaction sheet

    pub fn toggle_emoji_picker(&mut self, post_id: PostId) {
        self.emoji_picker = match self.emoji_picker {
            Some(open) if open == post_id => None,
            _ => Some(post_id),
        };
    }

    pub fn emoji_picker_target(&self) -> Option<PostId> {
        self.emoji_picker
    }

    pub fn select_post_for_reactions(&mut self, post_id: PostId) {
        self.selected_post = Some(post_id);
    }

    pub fn clear_selected_post(&mut self) {
        self.selected_post = None;
    }

    pub fn selected_post(&self) -> Option<PostId> {
        self.selected_post
    }

    pub fn selected_group(&self) -> &str {
        &self.selected_group
    }

    pub fn set_group(&mut self, group: impl Into<String>) {
        self.selected_group = group.into();
    }

    // View modes

    pub fn view_mode(&self) -> FeedViewMode {
        self.view_mode
    }

    pub fn open_grid(&mut self) {
        self.set_view_mode(FeedViewMode::Grid);
    }

    pub fn open_my_reactions(&mut self) {
        self.set_view_mode(FeedViewMode::MyReactions);
    }

    pub fn show_feed(&mut self) {
        self.set_view_mode(FeedViewMode::Feed);
    }

    fn set_view_mode(&mut self, mode: FeedViewMode) {
        if self.view_mode != mode {
            debug!("community view {:?} -> {:?}", self.view_mode, mode);
            self.emoji_picker = None;
            self.selected_post = None;
        }
        self.view_mode = mode;
    }

    /// Header back button: reaction overview returns to the grid, the grid
    /// returns to the feed, and the feed leaves the page.
    pub fn back(&mut self) -> BackOutcome {
        match self.view_mode {
            FeedViewMode::MyReactions => {
                self.set_view_mode(FeedViewMode::Grid);
                BackOutcome::Stay
            }
            FeedViewMode::Grid => {
                self.set_view_mode(FeedViewMode::Feed);
                BackOutcome::Stay
            }
            FeedViewMode::Feed => BackOutcome::LeavePage,
        }
    }

    pub fn show_bottom_nav(&self) -> bool {
        self.view_mode == FeedViewMode::Feed
    }

    pub fn visible_posts(&self) -> Vec<&Post> {
        match self.view_mode {
            FeedViewMode::Feed | FeedViewMode::Grid => self.posts.iter().collect(),
            FeedViewMode::MyReactions => self.my_reacted_posts(),
        }
    }

    /// Adds a post authored by the current user to the top of the feed.
    pub fn publish(&mut self, draft: PostDraft) -> PostId {
        let id = PostId(
            self.posts
                .iter()
                .map(|post| post.id.0)
                .max()
                .unwrap_or(0)
                + 1,
        );
        let post = Post {
            id,
            image: draft.image,
            badge: None,
            author: self.current_user.clone(),
            caption: draft.caption,
            text_overlay: draft.text_overlay,
            location: draft.location,
            weather: draft.weather,
            time: draft.time,
            health: draft.health,
            comments: Vec::new(),
            reactions: Vec::new(),
        };
        self.posts.insert(0, post);
        info!("published post {id}");
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn feed() -> CommunityFeed {
        CommunityFeed::from_seed(Duration::from_secs(2))
    }

    fn morning() -> NaiveTime {
        NaiveTime::from_hms_opt(9, 5, 0).expect("valid time")
    }

    #[test]
    fn timestamp_pads_minutes_only() {
        assert_eq!(format_comment_time(morning()), "9:05");
        let late = NaiveTime::from_hms_opt(23, 40, 0).expect("valid time");
        assert_eq!(format_comment_time(late), "23:40");
    }

    #[test]
    fn comment_keeps_text_as_typed_and_clears_draft() {
        let mut feed = feed();
        feed.set_comment_draft("  좋아요 ");
        assert!(feed.add_comment_at(PostId(4), morning()));
        assert_eq!(feed.comment_draft(), "");
        let comments = feed.overlay_comments(PostId(4));
        assert_eq!(comments.len(), 1);
        assert_eq!(comments[0].text, "  좋아요 ");
        assert_eq!(comments[0].author, seed::current_user());
        assert_eq!(comments[0].timestamp, "9:05");
    }

    #[test]
    fn comment_on_unknown_post_is_ignored() {
        let mut feed = feed();
        feed.set_comment_draft("hello");
        assert!(!feed.add_comment_at(PostId(99), morning()));
        assert_eq!(feed.comment_draft(), "hello");
    }

    #[test]
    fn reactions_merge_by_emoji_across_seed_and_overlay() {
        let mut feed = feed();
        let start = Instant::now();
        feed.add_reaction_at("👍", PostId(2), start);
        feed.add_reaction_at("🔥", PostId(2), start);

        let post = feed.post(PostId(2)).expect("seed post").clone();
        let merged = feed.merged_reactions(&post);
        let summary: Vec<(&str, Vec<&str>)> = merged
            .iter()
            .map(|r| {
                (
                    r.emoji.as_str(),
                    r.users.iter().map(|u| u.name.as_str()).collect(),
                )
            })
            .collect();
        assert_eq!(
            summary,
            vec![
                ("👍", vec!["엄마", "동생", "나"]),
                ("😊", vec!["동생"]),
                ("🔥", vec!["나"]),
            ]
        );
        assert_eq!(feed.reaction_count(&post), 5);
    }

    #[test]
    fn cross_origin_duplicates_are_not_deduplicated() {
        let me = seed::current_user();
        let seed_reactions = vec![Reaction {
            emoji: "❤️".into(),
            users: vec![me.clone()],
        }];
        let overlay = vec![Reaction {
            emoji: "❤️".into(),
            users: vec![me],
        }];
        let merged = merge_reactions(&seed_reactions, &overlay);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].users.len(), 2);
    }

    #[test]
    fn reacting_closes_picker_and_starts_burst() {
        let mut feed = feed();
        feed.toggle_emoji_picker(PostId(1));
        assert_eq!(feed.emoji_picker_target(), Some(PostId(1)));
        let ticket = feed.add_reaction_at("🎉", PostId(1), Instant::now());
        assert_eq!(feed.emoji_picker_target(), None);
        assert_eq!(feed.burst().active(), Some("🎉"));
        assert!(feed.expire_burst(ticket));
        assert_eq!(feed.burst().active(), None);
    }

    #[test]
    fn picker_toggles_per_post() {
        let mut feed = feed();
        feed.toggle_emoji_picker(PostId(1));
        feed.toggle_emoji_picker(PostId(2));
        assert_eq!(feed.emoji_picker_target(), Some(PostId(2)));
        feed.toggle_emoji_picker(PostId(2));
        assert_eq!(feed.emoji_picker_target(), None);
    }

    #[test]
    fn back_walks_reaction_view_to_grid_to_feed() {
        let mut feed = feed();
        feed.open_grid();
        feed.open_my_reactions();
        assert_eq!(feed.back(), BackOutcome::Stay);
        assert_eq!(feed.view_mode(), FeedViewMode::Grid);
        assert_eq!(feed.back(), BackOutcome::Stay);
        assert_eq!(feed.view_mode(), FeedViewMode::Feed);
        assert_eq!(feed.back(), BackOutcome::LeavePage);
    }

    #[test]
    fn publish_prepends_with_fresh_id() {
        let mut feed = feed();
        let id = feed.publish(PostDraft {
            image: "data:image/jpeg;base64,AAAA".into(),
            caption: "첫 업로드".into(),
            location: Some("집".into()),
            ..PostDraft::default()
        });
        assert_eq!(id, PostId(5));
        assert_eq!(feed.posts()[0].id, id);
        assert_eq!(feed.posts()[0].author, seed::current_user());
        assert!(feed.my_reacted_posts().is_empty());
    }
}
