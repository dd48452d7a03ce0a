//! Planning which common ingredients are still missing from the catalog.

use super::registry::{CandidateResult, IngredientRegistry};
use serde::Serialize;

/// A named group of candidate ingredient names.
#[derive(Debug, Clone, Copy)]
pub struct CandidateCategory {
    pub label: &'static str,
    pub candidates: &'static [&'static str],
}

pub const SUPPLEMENT_CANDIDATES: &[CandidateCategory] = &[
    CandidateCategory {
        label: "Vegetables",
        candidates: &[
            "白菜", "卷心菜", "包菜", "土豆", "红薯", "紫薯", "豆角", "四季豆", "韭菜", "韭黄",
            "蒜苗", "蒜薹", "莴笋", "生菜", "菜花", "花椰菜", "西兰花", "萝卜叶", "空心菜",
            "通菜", "菠菠菜", "小葱", "大葱", "洋葱头", "青椒", "红椒", "辣椒", "尖椒", "彩椒",
            "豆苗",
        ],
    },
    CandidateCategory {
        label: "Fruit",
        candidates: &[
            "香蕉", "橘子", "橙子", "芒果", "火龙果", "猕猴桃", "草莓", "蓝莓", "樱桃", "荔枝",
            "龙眼", "石榴", "椰子", "菠萝", "哈密瓜", "木瓜", "杏子", "枇杷", "山楂", "无花果",
            "桔子", "柚子肉", "金桔", "青梅",
        ],
    },
    CandidateCategory {
        label: "Grains",
        candidates: &[
            "小麦", "玉米", "燕麦", "黑米", "糯米", "粳米", "小米粥", "大麦", "荞麦", "高粱",
            "薏仁", "麦片",
        ],
    },
    CandidateCategory {
        label: "Meat & Eggs",
        candidates: &[
            "鹅蛋", "鸽蛋", "鱼肉", "草鱼", "鲤鱼", "鲫鱼", "带鱼肉", "黄鱼", "鲈鱼", "鳕鱼",
            "三文鱼", "金枪鱼",
        ],
    },
    CandidateCategory {
        label: "Beans & Soy",
        candidates: &[
            "绿豆", "黄豆", "黑豆芽", "绿豆芽", "豆腐", "豆浆", "腐竹", "豆皮", "豆干", "臭豆腐",
            "毛豆", "豌豆",
        ],
    },
    CandidateCategory {
        label: "Seasonings",
        candidates: &[
            "生抽", "老抽", "料酒", "米酒", "白酒", "黄酒", "芝麻油", "花生油", "菜籽油",
            "橄榄油", "胡椒粉", "花椒", "八角粉", "孜然", "咖喱粉", "辣椒粉", "蚝油", "鸡精",
        ],
    },
    CandidateCategory {
        label: "Seafood",
        candidates: &[
            "海带", "紫菜", "虾仁", "虾米", "海虾", "河虾", "螃蟹肉", "蟹黄", "鱿鱼", "墨鱼",
            "章鱼", "海参", "鲍鱼", "生蚝", "蛤蜊", "蚬子", "田螺", "河蚌",
        ],
    },
    CandidateCategory {
        label: "Nuts & Seeds",
        candidates: &[
            "花生", "瓜子", "葵花籽", "南瓜子", "腰果", "开心果", "碧根果", "夏威夷果", "松子",
            "榛子", "板栗", "白果",
        ],
    },
];

#[derive(Debug, Clone, Serialize)]
pub struct CategoryPlan {
    pub label: &'static str,
    pub candidate_count: usize,
    pub new_items: Vec<CandidateResult>,
    pub existing_items: Vec<CandidateResult>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SupplementPlan {
    /// Registry size before any additions.
    pub current_total: usize,
    pub categories: Vec<CategoryPlan>,
}

impl SupplementPlan {
    pub fn build(registry: &IngredientRegistry, categories: &[CandidateCategory]) -> Self {
        let categories = categories
            .iter()
            .map(|category| {
                let (existing_items, new_items): (Vec<_>, Vec<_>) = registry
                    .batch_check(category.candidates)
                    .into_iter()
                    .partition(|result| result.is_duplicate);
                CategoryPlan {
                    label: category.label,
                    candidate_count: category.candidates.len(),
                    new_items,
                    existing_items,
                }
            })
            .collect();

        Self {
            current_total: registry.len(),
            categories,
        }
    }

    /// Every recommended addition across categories, in category order.
    pub fn recommended(&self) -> Vec<&str> {
        self.categories
            .iter()
            .flat_map(|category| category.new_items.iter().map(|item| item.name.as_str()))
            .collect()
    }

    pub fn projected_total(&self) -> usize {
        self.current_total + self.recommended().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_candidates_into_new_and_existing() {
        let registry = IngredientRegistry::load(["白菜", "土豆(马铃薯)", "花生"]);
        let categories = [CandidateCategory {
            label: "Test",
            candidates: &["白菜", "土豆", "马铃薯", "红薯"],
        }];

        let plan = SupplementPlan::build(&registry, &categories);
        let category = &plan.categories[0];

        assert_eq!(category.candidate_count, 4);
        let existing: Vec<&str> = category
            .existing_items
            .iter()
            .map(|item| item.name.as_str())
            .collect();
        assert_eq!(existing, vec!["白菜", "土豆", "马铃薯"]);
        assert_eq!(plan.recommended(), vec!["红薯"]);
        assert_eq!(plan.current_total, 5);
        assert_eq!(plan.projected_total(), 6);
    }

    #[test]
    fn built_in_candidates_cover_every_category() {
        assert_eq!(SUPPLEMENT_CANDIDATES.len(), 8);
        assert!(SUPPLEMENT_CANDIDATES
            .iter()
            .all(|category| !category.candidates.is_empty()));
    }

    #[test]
    fn empty_registry_recommends_everything() {
        let registry = IngredientRegistry::load(Vec::<String>::new());
        let plan = SupplementPlan::build(&registry, SUPPLEMENT_CANDIDATES);
        let total: usize = SUPPLEMENT_CANDIDATES
            .iter()
            .map(|category| category.candidates.len())
            .sum();
        assert_eq!(plan.recommended().len(), total);
        assert_eq!(plan.projected_total(), total);
    }
}
