use shared::domain::{
    AtomId, AtomRole, AtomState, CompletionTransform, RoleOverride, ScenarioId,
    TransferRequirement,
};

use crate::Scenario;

struct AtomSpec {
    state: AtomState,
}

impl AtomSpec {
    fn new(id: &str, symbol: &str, name: &str, atomic_number: u32) -> Self {
        Self {
            state: AtomState {
                id: AtomId::new(id),
                symbol: symbol.to_string(),
                name: name.to_string(),
                atomic_number,
                valence_electrons: 0,
                max_valence: 8,
                role: AtomRole::Bystander,
                radius: 0.0,
                color: String::new(),
                charge: "0".to_string(),
                x: 0.0,
                y: 0.0,
                opacity: 1.0,
                scale: 1.0,
                target_slots: 0,
            },
        }
    }

    fn valence(mut self, electrons: u32, max: u32) -> Self {
        self.state.valence_electrons = electrons;
        self.state.max_valence = max;
        self
    }

    fn body(mut self, radius: f64, color: &str) -> Self {
        self.state.radius = radius;
        self.state.color = color.to_string();
        self
    }

    fn at(mut self, x: f64, y: f64) -> Self {
        self.state.x = x;
        self.state.y = y;
        self
    }

    fn ion(mut self, charge: &str, opacity: f64, scale: f64) -> Self {
        self.state.charge = charge.to_string();
        self.state.opacity = opacity;
        self.state.scale = scale;
        self
    }

    fn source(mut self) -> AtomState {
        self.state.role = AtomRole::Source;
        self.state
    }

    fn target(mut self, slots: u32) -> AtomState {
        self.state.role = AtomRole::Target;
        self.state.target_slots = slots;
        self.state
    }
}

pub(crate) fn scenarios() -> Vec<Scenario> {
    vec![sodium_chloride(), magnesium_oxide(), zinc_copper(), copper_silver()]
}

fn sodium_chloride() -> Scenario {
    Scenario {
        id: ScenarioId::new("level1"),
        level: 1,
        title: "基礎離子鍵 (Basic Ionic Bonding)".into(),
        description: "鈉 (Na) 是一種活性金屬，傾向於失去 1 個電子。氯 (Cl) 需要 1 個電子來填滿價殼層。請將鈉的價電子拖曳到氯的空位中。".into(),
        equation: "Na + Cl → Na⁺ + Cl⁻".into(),
        explanation_prompt: "解釋 Na 和 Cl 反應生成 NaCl 的過程，重點在於八隅體規則和電子轉移。".into(),
        atoms: vec![
            AtomSpec::new("Na", "Na", "鈉", 11)
                .valence(1, 8)
                .body(80.0, "#3b82f6")
                .at(250.0, 250.0)
                .source(),
            AtomSpec::new("Cl", "Cl", "氯", 17)
                .valence(7, 8)
                .body(70.0, "#22c55e")
                .at(550.0, 250.0)
                .target(1),
        ],
        transfers: vec![TransferRequirement::new("Na", "Cl", 1)],
        completion: Some(CompletionTransform {
            source: RoleOverride::new("+", 0.8),
            target: RoleOverride::new("-", 1.1),
        }),
    }
}

fn magnesium_oxide() -> Scenario {
    Scenario {
        id: ScenarioId::new("level2"),
        level: 2,
        title: "二價電子轉移 (Mg + O)".into(),
        description: "鎂 (Mg) 有 2 個價電子。氧 (O) 需要 2 個電子才能穩定。你需要完成兩次電子轉移才能形成氧化鎂 (MgO)。".into(),
        equation: "Mg + O → Mg²⁺ + O²⁻".into(),
        explanation_prompt: "解釋 Mg 和 O 生成 MgO 的過程，為什麼涉及兩個電子的轉移？".into(),
        atoms: vec![
            AtomSpec::new("Mg", "Mg", "鎂", 12)
                .valence(2, 8)
                .body(85.0, "#6366f1")
                .at(250.0, 250.0)
                .source(),
            AtomSpec::new("O", "O", "氧", 8)
                .valence(6, 8)
                .body(65.0, "#ef4444")
                .at(550.0, 250.0)
                .target(2),
        ],
        transfers: vec![TransferRequirement::new("Mg", "O", 2)],
        completion: Some(CompletionTransform {
            source: RoleOverride::new("+2", 0.8),
            target: RoleOverride::new("-2", 1.1),
        }),
    }
}

fn zinc_copper() -> Scenario {
    Scenario {
        id: ScenarioId::new("level3"),
        level: 3,
        title: "金屬置換反應 (Displacement)".into(),
        description: "鋅 (Zn) 比銅 (Cu) 活性大。將鋅片放入銅離子溶液中，鋅會失去 2 個電子溶解，而銅離子會獲得電子析出成為固體銅。".into(),
        equation: "Zn(s) + Cu²⁺(aq) → Zn²⁺(aq) + Cu(s)".into(),
        explanation_prompt: "解釋鋅和銅離子的氧化還原置換反應。為什麼鋅會溶解而銅會析出？".into(),
        atoms: vec![
            AtomSpec::new("Zn", "Zn", "鋅 (固體)", 30)
                .valence(2, 18)
                .body(90.0, "#94a3b8")
                .at(200.0, 250.0)
                .source(),
            // starts half-transparent: dissolved ion
            AtomSpec::new("Cu", "Cu", "銅離子 (水溶液)", 29)
                .valence(0, 18)
                .body(90.0, "#0ea5e9")
                .at(600.0, 250.0)
                .ion("+2", 0.6, 0.9)
                .target(2),
        ],
        transfers: vec![TransferRequirement::new("Zn", "Cu", 2)],
        // zinc dissolves, copper precipitates as a solid
        completion: Some(CompletionTransform {
            source: RoleOverride::new("+2", 0.8).with_opacity(0.3),
            target: RoleOverride::new("0", 1.0).with_opacity(1.0),
        }),
    }
}

fn copper_silver() -> Scenario {
    Scenario {
        id: ScenarioId::new("level4"),
        level: 4,
        title: "化學計量 (Stoichiometry)".into(),
        description: "銅 (Cu) 失去 2 個電子，但銀離子 (Ag⁺) 只需要 1 個電子。因此，1 個銅原子需要與 2 個銀離子反應。將銅的電子分配給兩個銀離子！".into(),
        equation: "Cu + 2Ag⁺ → Cu²⁺ + 2Ag".into(),
        explanation_prompt: "解釋銅與銀離子的反應，為什麼一個銅原子需要對應兩個銀離子？".into(),
        atoms: vec![
            AtomSpec::new("Cu", "Cu", "銅", 29)
                .valence(2, 18)
                .body(80.0, "#d97706")
                .at(200.0, 250.0)
                .source(),
            AtomSpec::new("Ag1", "Ag", "銀離子 1", 47)
                .valence(0, 18)
                .body(60.0, "#e2e8f0")
                .at(600.0, 150.0)
                .ion("+", 0.7, 0.9)
                .target(1),
            AtomSpec::new("Ag2", "Ag", "銀離子 2", 47)
                .valence(0, 18)
                .body(60.0, "#e2e8f0")
                .at(600.0, 350.0)
                .ion("+", 0.7, 0.9)
                .target(1),
        ],
        transfers: vec![
            TransferRequirement::new("Cu", "Ag1", 1),
            TransferRequirement::new("Cu", "Ag2", 1),
        ],
        completion: Some(CompletionTransform {
            source: RoleOverride::new("+2", 0.8),
            target: RoleOverride::new("0", 1.1),
        }),
    }
}
