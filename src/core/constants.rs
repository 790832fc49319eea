// Turn pacing
pub const TURN_PACING_MS: u64 = 500;

// Enrage
pub const ENRAGE_TURNS_NORMAL: u32 = 100;
pub const ENRAGE_TURNS_BOSS: u32 = 500;
pub const ENRAGE_ATK_PER_STACK: f64 = 0.4;
pub const ENRAGE_BLEED_INTERVAL: u32 = 10;
pub const ENRAGE_BLEED_FRACTION: f64 = 0.02;
pub const ENRAGE_BLEED_TURNS: u32 = 10;
pub const ENRAGE_BLEED_ID: &str = "enrage_bleed";
pub const ENRAGED_PASSIVE: &str = "Enraged";

// Room strength
pub const NORMAL_STRENGTH: f64 = 1.0;
pub const BOSS_STRENGTH: f64 = 100.0;

// Foe scaling
pub const FLOOR_STEP: f64 = 0.08;
pub const INDEX_STEP: f64 = 0.10;
pub const LOOP_STEP: f64 = 0.20;
pub const STAT_JITTER: f64 = 0.05;
pub const HP_FLOOR_PER_ROOM: u32 = 700;
pub const HP_FLOOR_LOW: f64 = 0.85;
pub const HP_FLOOR_HIGH: f64 = 1.10;
pub const MIN_FOE_CRIT_DAMAGE: f64 = 2.0;

// Experience
pub const EXP_PER_FOE_LEVEL: u64 = 12;
pub const EXP_PER_ROOM_INDEX: u64 = 5;
pub const SLIME_EXP_BONUS: f64 = 0.025;
pub const XP_CURVE_BASE: f64 = 100.0;
pub const XP_CURVE_EXPONENT: f64 = 1.5;
pub const LEVEL_UP_STAT_GROWTH: f64 = 0.05;

// Combatant defaults
pub const DEFAULT_MAX_HP: u32 = 1000;
pub const DEFAULT_ATK: u32 = 100;
pub const DEFAULT_DEFENSE: u32 = 50;
pub const DEFAULT_CRIT_RATE: f64 = 0.05;
pub const DEFAULT_CRIT_DAMAGE: f64 = 2.0;
pub const DEFAULT_REGAIN: f64 = 0.01;
pub const DEFAULT_EFFECT_HIT_RATE: f64 = 1.0;
pub const DEFAULT_EFFECT_RESISTANCE: f64 = 0.05;
pub const DEFENSE_CURVE: f64 = 100.0;

// Status effects
pub const DOT_BASE_CHANCE: f64 = 0.25;
pub const DOT_DAMAGE_FRACTION: f64 = 0.25;
pub const DOT_TURNS: u32 = 3;

// Rewards
pub const CARD_CHOICE_COUNT: usize = 3;
pub const RELIC_CHOICE_COUNT: usize = 3;
pub const RELIC_BASE_CHANCE_BOSS: f64 = 0.5;
pub const RELIC_BASE_CHANCE: f64 = 0.1;
pub const RDR_STAR_THRESHOLDS: [f64; 2] = [10.0, 10_000.0];
pub const RDR_STAR_CHANCE_CAP: f64 = 0.99;
pub const TICKET_CHANCE_PER_RDR: f64 = 0.1;
pub const TICKET_ITEM_ID: &str = "ticket";
pub const MAX_STARS: u8 = 5;

// Gold tiers: (base, uniform multiplier range)
pub const GOLD_NORMAL: (f64, f64, f64) = (5.0, 1.01, 1.25);
pub const GOLD_ELEVATED: (f64, f64, f64) = (20.0, 1.53, 2.25);
pub const GOLD_FLOOR_BOSS: (f64, f64, f64) = (200.0, 2.05, 4.25);

// Non-combat rooms
pub const SHOP_HEAL_FRACTION: f64 = 0.05;
