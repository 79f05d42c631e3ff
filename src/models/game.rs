use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Games whose mod folders can be managed.
///
/// Each game maps to one root path in the user configuration (see
/// [`GameId::config_key`]) and to a fixed, ordered list of categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum GameId {
    Genshin,
    StarRail,
    Zenless,
}

impl GameId {
    pub const ALL: [GameId; 3] = [GameId::Genshin, GameId::StarRail, GameId::Zenless];

    /// Human readable title, as shown in the game selector.
    pub fn display_name(self) -> &'static str {
        match self {
            GameId::Genshin => "Genshin Impact",
            GameId::StarRail => "Honkai: Star Rail",
            GameId::Zenless => "Zenless Zone Zero",
        }
    }

    /// Key under `Paths` in the user configuration holding this game's root.
    pub fn config_key(self) -> &'static str {
        match self {
            GameId::Genshin => "PathGIMI",
            GameId::StarRail => "PathSRMI",
            GameId::Zenless => "PathZZMI",
        }
    }

    /// Ordered category (character) names for this game.
    ///
    /// The list is static catalog data and does not depend on which
    /// directories exist on disk.
    pub fn categories(self) -> &'static [&'static str] {
        match self {
            GameId::Genshin => GENSHIN_CATEGORIES,
            GameId::StarRail => STAR_RAIL_CATEGORIES,
            GameId::Zenless => ZENLESS_CATEGORIES,
        }
    }
}

impl fmt::Display for GameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

const GENSHIN_CATEGORIES: &[&str] = &[
    "Aether", "Albedo", "Alhaitham", "Aloy", "Amber", "Arataki Itto", "Arlecchino", "Baizhu",
    "Barbara", "Beidou", "Bennet", "Candace", "Charlotte", "Chasca", "Chevreuse", "Chiori",
    "Chongyun", "Citlali", "Clorinde", "Collei", "Cyno", "Dehya", "Diluc", "Diona", "Dori",
    "Emilie", "Escoffier", "Eula", "Faruzan", "Fischl", "Freminet", "Furina", "Gaming", "Ganyu",
    "Gorou", "Hu Tao", "Iansan", "Ifa", "Jean", "Kachina", "Kaedehara Kazuha", "Kaeya",
    "Kamisato Ayaka", "Kamisato Ayato", "Kaveh", "Keqing", "Kinich", "Kirara", "Klee",
    "Kujou Sara", "Kuki Shinobu", "Lan Yan", "Layla", "Lisa", "Lumine", "Lynette", "Lyney",
    "Mavuika", "Mika", "Mona", "Mualani", "Nahida", "Navia", "Neuvillette", "Nilou",
    "Ningguang", "Noelle", "Ororon", "Qiqi", "Raiden Shogun", "Razor", "Rosaria",
    "Sangonomiya Kokomi", "Sayu", "Sethos", "Shenhe", "Shikanoin Heizou", "Sigewinne",
    "Sucrose", "Tartaglia", "Thoma", "Tighnari", "Varesa", "Venti", "Wanderer", "Wriothesley",
    "Xiangling", "Xianyun", "Xiao", "Xilonen", "Xingqiu", "Xinyan", "Yae Miko", "Yanfei",
    "Yaoyao", "Yelan", "Yoimiya", "Yumemizuki Mizuki", "Yun Jin", "Zhongli",
];

const STAR_RAIL_CATEGORIES: &[&str] = &[
    "Acheron", "Aglaea", "Anaxa", "Arlan", "Argenti", "Asta", "Aventurine", "Bailu",
    "Black Swan", "Blade", "Boothill", "Bronya", "Caelus", "Castorice", "Clara", "Dan Heng",
    "Dan Heng - Imbibitor Lunae", "Dr. Ratio", "Feixiao", "Firefly", "Fu Xuan", "Fugue",
    "Gallagher", "Gepard", "Guinaifen", "Hanya", "Herta", "Himeko", "Hook", "Huohuo", "Jade",
    "Jiaoqiu", "Jing Yuan", "Jingliu", "Kafka", "Lingsha", "Luocha", "Luka", "Lynx",
    "March 7th", "March 7th (hunt)", "Misha", "Moze", "Mydei", "Natasha", "Pela", "Qingque",
    "Rappa", "Robin", "Ruan Mei", "Sampo", "Seele", "Serval", "Silver Wolf", "Sparkle",
    "Stelle", "Sunday", "Sushang", "The Herta", "Tingyun", "Topaz and Numby", "Tribbie",
    "Welt", "Xueyi", "Yanqing", "Yukong", "Yunli",
];

const ZENLESS_CATEGORIES: &[&str] = &[
    "Anby", "Anby Soldier 0", "Anton", "Astra Yao", "Ben", "Billy", "Burnice", "Caesar",
    "Corin", "Ellen", "Evelyn", "Grace", "Harumasa", "Jane Doe", "Koleda", "Lighter", "Lucy",
    "Lycaon", "Miyabi", "Nicole", "Nekomata", "Piper", "Pulchra", "Qingyi", "Rina", "Seth",
    "Soldier 11", "Soukaku", "Trigger", "Vivian", "Yanagi", "Zhu Yuan",
];
