//! Tuning constants.
//!
//! Every duration is counted in ticks (one tick per display frame).

// ==================== Arena ====================
/// Hero and enemy diameter, as a fraction of the shorter canvas side
pub const BASE_SIZE_RATIO: f64 = 0.15;

// ==================== Hero ====================
pub const HERO_SPEED: f64 = 5.0;
/// fraction of the remaining distance to the pointer covered each tick
pub const POINTER_SMOOTHING: f64 = 0.1;

// ==================== Projectiles ====================
pub const PROJECTILE_SPEED: f64 = 10.0;
pub const PROJECTILE_WIDTH_RATIO: f64 = 0.1;
pub const PROJECTILE_HEIGHT_RATIO: f64 = 0.2;
pub const PROJECTILE_COLOR: &str = "white";

// ==================== Enemies ====================
/// Number of enemy tiers, one per enemy sprite
pub const ENEMY_TIERS: usize = 4;
pub const ENEMY_BASE_SPEED: f64 = 1.35;
pub const ENEMY_SPEED_PER_LEVEL: f64 = 0.63;
pub const ENEMY_BASE_HEALTH: f64 = 4.0;
pub const ENEMY_HEALTH_PER_LEVEL: f64 = 3.0;
pub const ENEMY_HEALTH_SCALE: f64 = 1.26;
/// spawn exclusion radius around the hero, in enemy sizes
pub const SPAWN_MIN_DISTANCE_FACTOR: f64 = 3.0;
pub const SPAWN_MAX_ATTEMPTS: u32 = 10_000;

// ==================== Score ====================
pub const TICKS_PER_POINT: u64 = 100;
pub const SCORE_MILESTONE: u32 = 10;
pub const SCORE_PULSE_TICKS: u32 = 120;
pub const SCORE_PULSE_FREQUENCY: f64 = 0.2;
pub const SCORE_PULSE_AMPLITUDE: f64 = 0.3;

// ==================== Kill effects ====================
pub const KILL_BANNER_TICKS: u32 = 60;
pub const KILL_STING_REPEATS: u32 = 3;
pub const KILL_STING_GAP_TICKS: u32 = 30;
pub const MUSIC_DUCK_TICKS: u32 = 90;

// ==================== End of game ====================
pub const DEFEAT_FREEZE_TICKS: u32 = 180;
pub const HEART_PULSE_TICKS: u32 = 360;
/// the heart fades out over the final third of its pulse
pub const HEART_FADE_TICKS: u32 = HEART_PULSE_TICKS / 3;
pub const HEART_SIZE_RATIO: f64 = 0.3;
pub const HEART_BEAT_FREQUENCY: f64 = 0.1;
pub const HEART_BEAT_AMPLITUDE: f64 = 0.1;
pub const HEART_CENTER_Y_RATIO: f64 = 0.35;
pub const HEART_FILL: &str = "#ff0000";
pub const HEART_STROKE: &str = "#ffffff";
pub const HEART_LINE_WIDTH: f64 = 5.0;

pub const CRAWL_SHOW_TICK: u32 = 420;
pub const IMAGE_SEQUENCE_TICK: u32 = 1440;
pub const BACKGROUND_FADE_END: u32 = 120;
pub const FOREGROUND_FADE_END: u32 = 240;
pub const CAPTION_FADE_END: u32 = 300;
pub const SLOW_FADE_STEP: f64 = 1.0 / 120.0;
pub const FAST_FADE_STEP: f64 = 1.0 / 60.0;

pub const PORTRAIT_SIZE_FACTOR: f64 = 2.0;
pub const CAPTION_FONT_RATIO: f64 = 0.1;
pub const CAPTION_Y_RATIO: f64 = 0.75;
pub const CAPTION_FILL: &str = "#ff0000";
pub const CAPTION_STROKE: &str = "#000000";
pub const CAPTION_LINE_WIDTH: f64 = 4.0;

// ==================== Startup ====================
pub const TITLE_CARD_MS: i32 = 3000;

// ==================== Audio ====================
pub const MUSIC_VOLUME: f64 = 0.3;
pub const MUSIC_DUCKED_VOLUME: f64 = 0.1;
pub const SHOOT_VOLUME: f64 = 0.07;
pub const KILL_VOLUME: f64 = 0.7;
pub const VICTORY_VOLUME: f64 = 0.8;
pub const INTRO_VOLUME: f64 = 0.5;

// ==================== Assets ====================
pub mod assets {
    pub const HERO_IMAGE: &str = "1.png";
    pub const BACKDROP_IMAGE: &str = "10.jpeg";
    /// ordered by tier
    pub const ENEMY_IMAGES: [&str; super::ENEMY_TIERS] = ["5.png", "2.png", "3.png", "4.png"];

    pub const MUSIC: &str = "6.mp3";
    pub const SHOOT: &str = "8.mp3";
    pub const KILL: &str = "7.m4a";
    pub const VICTORY: &str = "9.mp3";
    pub const INTRO: &str = "12.m4a";
}

// ==================== Text ====================
pub mod text {
    pub const DEFEAT: &str = "You failed. The Dandy got engaged.";
    pub const VICTORY: &str = "You failed anyway. You got engaged too.";
    pub const CRAWL: &str = "Despite all your efforts the Dandy was caught. \
        First they met alone, then at friends' houses... and now the turning point: \
        a birthday in public marking the start of the official engagement.";
    pub const CAPTION: &str = "Caught at last!!";
    pub const CAPTION_FONT: &str = "Impact";

    pub fn score(score: u32) -> String {
        format!("Score: {} days single", score)
    }
}
