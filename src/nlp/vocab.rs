//! Curated review vocabulary
//!
//! Term lists used by the lexicon rules. Matching is by substring unless a
//! list says otherwise.

// ─── Aspect rules (first match wins, in this order) ─────────────────────────

/// Overall-experience markers ("come again", "recommend", "worth it").
pub const SUMMARY_MARKERS: &[&str] = &[
    "再來", "推薦", "不會再來", "下次", "大家", "值得", "不推", "不推薦",
];

/// Suggestion / wish markers.
pub const SUGGESTION_MARKERS: &[&str] = &["希望", "建議", "期望", "如果能", "希望能"];

pub const PRICE_TERMS: &[&str] = &["價格", "貴", "便宜", "CP"];

pub const FOOD_TERMS: &[&str] = &["小料", "湯頭", "口味", "飲料"];

pub const ENVIRONMENT_TERMS: &[&str] = &[
    "樓上", "風景", "裝潢", "氣氛", "環境", "地點", "位置", "空間",
];

pub const SERVICE_TERMS: &[&str] = &["細節", "人員", "態度"];

// ─── Sentiment cascade ──────────────────────────────────────────────────────

/// Phrases that settle a sentence as positive without asking the model.
pub const SUMMARY_POSITIVE: &[&str] = &[
    "下次還要來吃", "下次還會再來", "還要來", "還會來", "值得", "推薦給大家",
];

/// Plain ordering statements ("ordered X").
pub const NEUTRAL_PATTERNS: &[&str] = &["點了"];

/// Generic opinion words; their presence keeps a neutral pattern from applying.
pub const SENTIMENT_WORDS: &[&str] = &[
    "好吃", "難吃", "推薦", "失望", "滿意", "討厭", "棒", "喜歡", "推", "不推", "不推薦",
    "不值得", "值得", "讚",
];

pub const POSITIVE_EMOJI: &[&str] = &[
    "😊", "👍", "XD", "😂", "😍", ":D", ":)", "^_^", "^O^", "😃", "😄", "😆", "😁", "🥰", "😋",
    "😎",
];

pub const NEGATIVE_EMOJI: &[&str] = &[
    "😡", "👎", "QQ", "哭", ":(", ">:(", "T_T", "QAQ", "😢", "😞", "😠", "😣", "😖", "😔",
];

pub const EXTREME_POSITIVE: &[&str] = &[
    "超讚", "超棒", "超好吃", "超滿意", "超推薦", "超喜歡", "超值",
];

pub const EXTREME_NEGATIVE: &[&str] = &["超爛", "超難吃", "超失望", "超糟糕", "超差", "超討厭"];

/// Qualifiers that pull a score toward neutral ("a bit", "slightly").
pub const SOFTENERS: &[&str] = &["有點", "稍微", "有些"];

// ─── Food mentions ──────────────────────────────────────────────────────────

/// Dishes and ingredients that are food on sight.
pub const CORE_FOOD_TERMS: &[&str] = &[
    "火鍋", "壽司", "牛排", "冰淇淋", "拉麵", "小菜", "燒肉", "霜淇淋", "蛋糕", "豆腐", "雞肉",
    "豬排", "蝦仁", "飯", "麵", "奶茶", "咖哩", "鴨", "牛肉", "魚", "紅豆", "抹茶", "巧克力",
    "芒果", "檸檬", "馬鈴薯", "蒜", "雞", "炸雞", "炸豬排", "海鮮", "燉飯", "鹽酥雞", "椒麻雞",
];

/// Dish names that are accepted without consulting the classifier.
pub const CORE_FOOD_KEYWORDS: &[&str] = &[
    "火鍋", "壽司", "牛排", "冰淇淋", "拉麵", "燒肉", "豬排", "麵", "飯", "奶茶", "炸雞", "鹽酥雞",
    "椒麻雞", "蛋糕", "豆腐",
];

/// Multi-word dishes the segmenter tends to split.
pub const SPECIAL_FOOD_PHRASES: &[&str] = &[
    "鹽酥雞", "椒麻雞", "炸豬排", "霜淇淋", "冰淇淋", "宮保雞丁鐵板麵",
];

/// Added as window candidates when no other strategy produced them.
pub const SPECIAL_FOODS: &[&str] = &["鹽酥雞", "椒麻雞", "炸豬排", "炸雞"];

/// Affixes that mark a phrase as a dish or ingredient.
pub const FOOD_CATEGORY_AFFIXES: &[&str] = &[
    "餐", "飯", "麵", "湯", "醬", "甜點", "冰", "炸", "烤", "煮", "蒸", "燉", "捲", "堡", "餅",
    "塔", "泥", "奶", "茶", "酪", "羅", "拋", "粥", "糕", "排", "肉", "菜", "豆", "鮮", "豬",
    "牛", "雞", "魚", "蝦", "貝", "米", "酥", "蛋", "泰式", "義式", "日式", "韓式", "美式",
    "中式", "料理",
];

/// Descriptive terms that disqualify a window outright.
pub const DESCRIPTION_TERMS: &[&str] = &[
    "湯頭", "口味", "味道", "外皮", "感覺", "香氣", "姊姊", "人員", "態度", "外帶",
];

/// Context words that disqualify an affix match.
pub const AFFIX_DISQUALIFIERS: &[&str] = &["姊姊", "感覺", "這次", "下次", "這家", "服務"];

/// Generic nouns never kept as noun-run candidates.
pub const EXCLUDED_NOUNS: &[&str] = &[
    "東西", "餐點", "料理", "食物", "東西們", "感覺", "服務", "這家", "下次", "這次",
];

/// Spans never kept as food candidates (exact match).
pub const EXCLUDED_FOODS: &[&str] = &[
    "這家", "這個", "口", "有機", "份", "公共", "一", "一份", "本家", "家", "價格", "湯頭",
    "質感", "份量", "口味", "部分", "一些", "新品", "主廚手藝", "香氣", "甜點部分", "肉質",
    "肉品", "味噌湯鹹度", "紅豆餡", "紅豆餅外皮", "冰塊", "茶香", "抹茶布丁口感", "九層塔香氣",
    "巧克力慕斯蛋", "糕", "白飯", "餅皮", "餡", "肉", "甜麵醬", "青菜", "菜", "飲料", "醬料",
    "蔥段", "布丁口感", "慕斯蛋糕", "蛋糕味道", "冰淇淋口味", "拉麵湯頭", "牛肉麵湯頭",
    "義大利麵蒜味", "烏龍麵Q彈", "姊姊烤",
];

/// Substrings that remove a candidate before classification.
pub const CANDIDATE_EXCLUSIONS: &[&str] = &["湯頭", "口味", "味道", "姊姊", "服務"];

/// Venue-type words; a candidate naming a place is never a food.
pub const FACILITY_TERMS: &[&str] = &["店", "餐廳", "館", "攤"];

/// Substrings that remove an accepted food.
pub const RESIDUAL_EXCLUSIONS: &[&str] = &["這家", "下次", "服務", "湯頭", "口味"];

/// Grammatical particles a real dish name never ends with.
pub const TRAILING_PARTICLES: &[&str] = &["的", "了", "很", "也", "都"];

pub const FLAVOR_KEYWORDS: &[&str] = &[
    "鹹", "甜", "辣", "苦", "酸", "香", "口味", "酥脆", "濃郁", "綿密", "清爽", "香濃", "鮮嫩",
    "爽口", "Q彈", "多汁", "彈牙", "入味", "香脆", "嫩滑", "香甜", "鬆軟", "滑順", "酸甜", "香辣",
    "軟嫩", "微酸",
];

/// Labels sent to the classifier in preference mode.
pub const FOOD_LABELS: &[&str] = &["食物", "食物種類", "食物口味"];

/// Entity type kept from the recognizer.
pub const PRODUCT_ENTITY: &str = "PRODUCT";
