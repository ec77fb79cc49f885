//! Unit and asset icon table.
//!
//! Identifier-to-descriptor mapping for every icon the interpreter may
//! reference. Unknown identifiers fall back to the default unit icon.

/// One entry in the icon asset table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IconDescriptor {
    pub id: &'static str,
    pub url: &'static str,
    /// Square pixel size the widget renders the icon at.
    pub size: u32,
}

const fn icon(id: &'static str, url: &'static str, size: u32) -> IconDescriptor {
    IconDescriptor { id, url, size }
}

const TABLE: &[IconDescriptor] = &[
    icon("command_center", "https://img.icons8.com/color/48/building.png", 40),
    icon("default_unit", "https://img.icons8.com/ios-filled/50/26e07f/truck.png", 35),
    icon("truck", "https://img.icons8.com/ios-filled/50/26e07f/truck.png", 35),
    icon("drone", "https://img.icons8.com/ios-filled/50/00ddff/drone.png", 30),
    icon("amphibious", "https://img.icons8.com/color/48/airboat.png", 40),
    icon("excavator", "https://img.icons8.com/ios-filled/50/f5a623/excavator.png", 35),
    icon("robot_arm", "https://img.icons8.com/external-soft-fill-juicy-fish/60/external-robot-automation-soft-fill-juicy-fish.png", 40),
    icon("crawler", "https://img.icons8.com/ios-filled/50/f5a623/robot-2.png", 35),
    icon("snake_robot", "https://img.icons8.com/ios/50/00ddff/robot-2.png", 35),
    icon("fire_robot", "https://img.icons8.com/ios-filled/50/e94560/robot-2.png", 35),
    icon("decon_robot", "https://img.icons8.com/ios-filled/50/26e07f/robot-2.png", 35),
    // The interpreter emits "printer3d" without a separator.
    icon("printer3d", "https://img.icons8.com/external-kiranshastry-solid-kiranshastry/64/f5a623/external-3d-printer-industry-kiranshastry-solid-kiranshastry.png", 40),
    icon("supplies", "https://img.icons8.com/plasticine/100/box.png", 40),
    icon("fire", "https://img.icons8.com/color/48/fire-element.png", 40),
    icon("hazard", "https://img.icons8.com/color/48/biohazard.png", 40),
    icon("radiation", "https://img.icons8.com/fluency/48/radiation-warning-sign.png", 40),
    icon("ammunition", "https://img.icons8.com/color/48/missile.png", 40),
    icon("medical", "https://img.icons8.com/color/48/hospital-3.png", 35),
    icon("repair", "https://img.icons8.com/color/48/maintenance.png", 35),
    icon("monitor", "https://img.icons8.com/fluency/48/wifi-router.png", 25),
    icon("barrier", "https://img.icons8.com/color/48/road-closure.png", 40),
    icon("power", "https://img.icons8.com/fluency/48/lightning-bolt.png", 35),
    icon("shield", "https://img.icons8.com/fluency/48/security-shield-green.png", 35),
    icon("animal", "https://img.icons8.com/color/48/pet-commands-summon.png", 35),
    icon("data", "https://img.icons8.com/fluency/48/database.png", 35),
    icon("siren", "https://img.icons8.com/color/48/siren.png", 35),
    icon("jammer", "https://img.icons8.com/ios-filled/50/e94560/no-audio.png", 35),
    icon("camera", "https://img.icons8.com/color/48/camera.png", 35),
];

/// Exact lookup; `None` for unknown identifiers.
pub fn lookup(id: &str) -> Option<IconDescriptor> {
    TABLE.iter().find(|entry| entry.id == id).copied()
}

/// Lookup that must succeed; all call sites use ids present in [`TABLE`].
fn table(id: &str) -> IconDescriptor {
    match lookup(id) {
        Some(descriptor) => descriptor,
        None => default_unit(),
    }
}

pub fn default_unit() -> IconDescriptor {
    TABLE[1]
}

pub fn command_center() -> IconDescriptor {
    TABLE[0]
}

/// Unit icon for an optional identifier, default for unknown/absent.
pub fn unit_or_default(id: Option<&str>) -> IconDescriptor {
    id.and_then(lookup).unwrap_or_else(default_unit)
}

/// Hazard-zone icon, biohazard default.
pub fn hazard_or_default(id: Option<&str>) -> IconDescriptor {
    id.and_then(lookup).unwrap_or_else(|| table("hazard"))
}

pub fn supplies() -> IconDescriptor {
    table("supplies")
}

pub fn excavator() -> IconDescriptor {
    table("excavator")
}

pub fn repair() -> IconDescriptor {
    table("repair")
}

pub fn medical() -> IconDescriptor {
    table("medical")
}

pub fn data() -> IconDescriptor {
    table("data")
}

pub fn siren() -> IconDescriptor {
    table("siren")
}

pub fn jammer() -> IconDescriptor {
    table("jammer")
}

pub fn radiation() -> IconDescriptor {
    table("radiation")
}

pub fn robot_arm() -> IconDescriptor {
    table("robot_arm")
}

pub fn camera() -> IconDescriptor {
    table("camera")
}

pub fn fire() -> IconDescriptor {
    table("fire")
}

pub fn monitor() -> IconDescriptor {
    table("monitor")
}

pub fn power() -> IconDescriptor {
    table("power")
}

pub fn shield() -> IconDescriptor {
    table("shield")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_unit_icon_falls_back_to_default() {
        assert_eq!(unit_or_default(Some("hovercraft")), default_unit());
        assert_eq!(unit_or_default(None), default_unit());
        assert_eq!(unit_or_default(Some("drone")).id, "drone");
    }

    #[test]
    fn interpreter_wire_ids_resolve_without_fallback() {
        // Ids exactly as the interpreter sends them, including the one
        // without a separator.
        for id in ["printer3d", "robot_arm", "fire_robot", "snake_robot"] {
            assert_eq!(unit_or_default(Some(id)).id, id);
        }
    }

    #[test]
    fn table_ids_are_unique() {
        for (i, a) in TABLE.iter().enumerate() {
            for b in &TABLE[i + 1..] {
                assert_ne!(a.id, b.id, "duplicate icon id {}", a.id);
            }
        }
    }
}
