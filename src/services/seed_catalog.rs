// src/services/seed_catalog.rs
//
// Demo data written by POST /seed_data.

pub struct WorkTypeSeed {
    pub name: &'static str,
    pub order: i32,
    pub color: &'static str,
    pub category: &'static str,
}

pub struct BlockSeed {
    pub name: &'static str,
    pub floors: &'static [&'static str],
}

pub struct ProjectSeed {
    pub code: &'static str,
    pub icon: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub client: &'static str,
    pub contractor: &'static str,
    pub address: &'static str,
    pub start_date: (i32, u32, u32),
    pub end_date: (i32, u32, u32),
    pub budget: f64,
    pub blocks: &'static [BlockSeed],
    pub objects: &'static [&'static str],
}

const ROUGH: &str = "Черновые работы";
const FINISHING: &str = "Отделочные работы";
const SPECIAL: &str = "Специальные работы";
const CLOSING: &str = "Завершающие работы";
const CEILINGS: &str = "Потолки";

pub const WORK_TYPES: &[WorkTypeSeed] = &[
    WorkTypeSeed { name: "Штукатурка", order: 1, color: "#e53e3e", category: ROUGH },
    WorkTypeSeed { name: "Стяжка", order: 2, color: "#fd7900", category: ROUGH },
    WorkTypeSeed { name: "Утеплитель", order: 3, color: "#fbb917", category: ROUGH },
    WorkTypeSeed { name: "Шпаклёвка", order: 4, color: "#38a169", category: FINISHING },
    WorkTypeSeed { name: "Шпатлёвка", order: 4, color: "#38a169", category: FINISHING },
    WorkTypeSeed { name: "Плитка", order: 5, color: "#3182ce", category: FINISHING },
    WorkTypeSeed { name: "Сапожок", order: 6, color: "#805ad5", category: FINISHING },
    WorkTypeSeed { name: "ГКЛ", order: 7, color: "#9c88ff", category: "Конструкции" },
    WorkTypeSeed { name: "Армстронг", order: 8, color: "#48bb78", category: CEILINGS },
    WorkTypeSeed { name: "Грильято", order: 9, color: "#ed8936", category: CEILINGS },
    WorkTypeSeed { name: "Кварц винил", order: 10, color: "#38b2ac", category: "Напольные покрытия" },
    WorkTypeSeed { name: "Шкурка", order: 11, color: "#667eea", category: FINISHING },
    WorkTypeSeed { name: "Покраска", order: 12, color: "#e53e3e", category: FINISHING },
    WorkTypeSeed { name: "Покраска стен", order: 13, color: "#718096", category: FINISHING },
    WorkTypeSeed { name: "Сапожок (после дверников)", order: 14, color: "#4a5568", category: FINISHING },
    WorkTypeSeed { name: "Заделка штроб под радиатором", order: 15, color: "#2d3748", category: SPECIAL },
    WorkTypeSeed { name: "Дверные откосы внутри квартиры", order: 16, color: "#1a202c", category: SPECIAL },
    WorkTypeSeed { name: "Монтаж плитки на подоконники", order: 17, color: "#e53e3e", category: SPECIAL },
    WorkTypeSeed { name: "Монтаж плитки на лифтовые порталы", order: 18, color: "#718096", category: SPECIAL },
    WorkTypeSeed { name: "Монтаж табличек", order: 19, color: "#fd7900", category: CLOSING },
    WorkTypeSeed { name: "Уборка", order: 20, color: "#38a169", category: CLOSING },
];

pub const EXECUTORS: &[&str] = &[
    "СМР Майкоп",
    "СМР Гулькевичи",
    "СМР Кропоткин",
    "Бригада №1",
    "Бригада №2",
    "Электрики",
    "Сантехники",
    "Отделочники",
    "Универсалы",
    "Подрядчик А",
    "Подрядчик Б",
];

const NINE_FLOORS: &[&str] = &["1", "2", "3", "4", "5", "6", "7", "8", "9"];
const FOUR_FLOORS: &[&str] = &["1", "2", "3", "4"];

pub const PROJECTS: &[ProjectSeed] = &[
    ProjectSeed {
        code: "maikop",
        icon: "🏗️",
        name: "ЖК Майкоп литер 3.2",
        description: "Современный жилой комплекс с коммерческими помещениями",
        client: "Группа компаний Стройальянс",
        contractor: "СМР Майкоп",
        address: "г. Майкоп, пр. Ленина, 234",
        start_date: (2024, 5, 31),
        end_date: (2024, 8, 10),
        budget: 1_200_000_000.0,
        blocks: &[
            BlockSeed { name: "М-1", floors: NINE_FLOORS },
            BlockSeed { name: "М-2", floors: NINE_FLOORS },
        ],
        objects: &["Коммерция", "Лифт.холл", "Квартиры", "МОП", "Лест. м."],
    },
    ProjectSeed {
        code: "gulkevichi",
        icon: "🏢",
        name: "ЖК Гулькевичи",
        description: "Жилой комплекс в г. Гулькевичи. 4 блока с техническими помещениями",
        client: "ООО Строй-Инвест",
        contractor: "СМР Гулькевичи",
        address: "г. Гулькевичи, ул. Центральная, 15",
        start_date: (2024, 6, 27),
        end_date: (2024, 8, 31),
        budget: 850_000_000.0,
        blocks: &[
            BlockSeed {
                name: "Г-1",
                floors: &["Тех. Подполье БС4", "Тех. Подполье БС2", "1", "2", "3", "4"],
            },
            BlockSeed { name: "Г-2", floors: FOUR_FLOORS },
            BlockSeed { name: "Г-3", floors: FOUR_FLOORS },
            BlockSeed { name: "Г-4", floors: FOUR_FLOORS },
        ],
        objects: &["Электрощитовая", "ВНС", "Квартиры", "МОП", "Лифт.холл", "Лест. м.", "Коммерция"],
    },
    ProjectSeed {
        code: "kropotkin",
        icon: "🏭",
        name: "Кропоткин промышленный комплекс",
        description: "Промышленный объект с производственными и административными помещениями",
        client: "ПАО Кропоткинский завод",
        contractor: "СМР Кропоткин",
        address: "г. Кропоткин, ул. Промышленная, 88",
        start_date: (2024, 6, 22),
        end_date: (2024, 8, 31),
        budget: 450_000_000.0,
        blocks: &[BlockSeed {
            name: "К-2",
            floors: &["Тех. Подполье", "1", "2", "3", "4", "5", "6", "7", "8", "9"],
        }],
        objects: &["Электрощитовая", "ВНС", "Квартиры", "МОП", "Лифт.холл", "Лест. м."],
    },
];
