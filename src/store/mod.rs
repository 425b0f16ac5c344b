pub mod prefs;

pub use prefs::PrefsStore;
