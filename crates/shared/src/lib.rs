use serde::{Deserialize, Serialize};

/// Уникальный идентификатор детали станка
pub type PartId = String;

/// RGB-цвет (0..=255 на канал)
pub type Rgb = [u8; 3];

/// Тип примитива
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Primitive {
    Box {
        width: f64,
        height: f64,
        depth: f64,
    },
    /// Цилиндр вдоль оси Y (усечённый конус при разных радиусах)
    Cylinder {
        radius_top: f64,
        radius_bottom: f64,
        height: f64,
        radial_segments: u32,
    },
}

impl Primitive {
    pub fn cuboid(width: f64, height: f64, depth: f64) -> Self {
        Primitive::Box {
            width,
            height,
            depth,
        }
    }

    pub fn cylinder(radius: f64, height: f64, radial_segments: u32) -> Self {
        Primitive::Cylinder {
            radius_top: radius,
            radius_bottom: radius,
            height,
            radial_segments,
        }
    }
}

/// Трансформация относительно родительского узла.
/// Поворот задаётся углами Эйлера (радианы, порядок XYZ).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Transform {
    pub position: [f64; 3],
    #[serde(default)]
    pub rotation: [f64; 3],
}

impl Transform {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn at(position: [f64; 3]) -> Self {
        Self {
            position,
            rotation: [0.0; 3],
        }
    }

    pub fn rotated(mut self, rotation: [f64; 3]) -> Self {
        self.rotation = rotation;
        self
    }
}

/// Параметры PBR-материала
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Material {
    pub roughness: f64,
    pub metalness: f64,
}

/// Описание интерактивной детали станка
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartDescriptor {
    pub id: PartId,
    pub title: String,
    pub description: String,
    pub primitive: Primitive,
    pub transform: Transform,
    pub base_color: Rgb,
    pub hover_color: Rgb,
    pub material: Material,
}

/// Декоративная (неинтерактивная) деталь: без идентификатора, без подсветки
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecorMesh {
    pub name: String,
    pub primitive: Primitive,
    pub transform: Transform,
    pub color: Rgb,
    pub material: Material,
}

/// Узел иерархии сцены
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SceneNode {
    /// Группа с собственной системой координат
    Group {
        name: String,
        transform: Transform,
        children: Vec<SceneNode>,
    },
    /// Ссылка на деталь из таблицы по идентификатору
    Part { id: PartId },
    Decor(DecorMesh),
}

impl SceneNode {
    pub fn group(name: &str, transform: Transform, children: Vec<SceneNode>) -> Self {
        SceneNode::Group {
            name: name.to_string(),
            transform,
            children,
        }
    }

    pub fn part(id: &str) -> Self {
        SceneNode::Part { id: id.to_string() }
    }

    /// Все идентификаторы деталей в порядке обхода (с повторами, если они есть)
    pub fn part_ids(&self) -> Vec<&PartId> {
        let mut ids = Vec::new();
        self.collect_part_ids(&mut ids);
        ids
    }

    fn collect_part_ids<'a>(&'a self, out: &mut Vec<&'a PartId>) {
        match self {
            SceneNode::Group { children, .. } => {
                for child in children {
                    child.collect_part_ids(out);
                }
            }
            SceneNode::Part { id } => out.push(id),
            SceneNode::Decor(_) => {}
        }
    }
}

/// Цвет в виде "#rrggbb"
pub fn hex_color(rgb: Rgb) -> String {
    format!("#{:02x}{:02x}{:02x}", rgb[0], rgb[1], rgb[2])
}
