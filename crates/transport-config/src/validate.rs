//! Structural checks on the raw JSON document.
//!
//! Runs before typed deserialization so that every missing field is
//! reported together instead of stopping at the first one.

use serde_json::Value;

use crate::error::ValidationErrors;

/// Look up a dotted path such as `material.pabs`
fn lookup<'a>(doc: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.')
        .try_fold(doc, |node, key| node.get(key))
        .filter(|value| !value.is_null())
}

fn require(doc: &Value, path: &str, errors: &mut ValidationErrors) -> bool {
    let present = lookup(doc, path).is_some();
    if !present {
        errors.missing(path);
    }
    present
}

/// Accept either spelling of a field, reporting the first one when both are absent
fn require_either(doc: &Value, path: &str, alias: &str, errors: &mut ValidationErrors) {
    if lookup(doc, path).is_none() && lookup(doc, alias).is_none() {
        errors.missing(path);
    }
}

fn require_positive_integer(doc: &Value, path: &str, errors: &mut ValidationErrors) {
    if let Some(value) = lookup(doc, path) {
        if !value.as_u64().is_some_and(|n| n > 0) {
            errors.add(format!("Configuration value '{path}' must be a positive integer"));
        }
    }
}

fn single_material(doc: &Value, charged: bool, errors: &mut ValidationErrors) {
    require(doc, "material", errors);
    for field in ["mean_free_path", "pabs", "k"] {
        require(doc, &format!("material.{field}"), errors);
    }
    if charged {
        require(doc, "material.absorption_power", errors);
    }
}

fn double_material(doc: &Value, charged: bool, errors: &mut ValidationErrors) {
    require(doc, "material", errors);
    for region in ["1", "2"] {
        require_either(
            doc,
            &format!("material.mean_free_path_{region}"),
            &format!("material.mean_free_path{region}"),
            errors,
        );
        require_either(
            doc,
            &format!("material.pabs_{region}"),
            &format!("material.pabs{region}"),
            errors,
        );
        require(doc, &format!("material.k{region}"), errors);
        if charged {
            require(doc, &format!("material.absorption_power{region}"), errors);
        }
    }
}

/// Check `doc` for everything a run needs
pub fn validate(doc: &Value) -> ValidationErrors {
    let mut errors = ValidationErrors::new();

    require(doc, "run", &mut errors);
    require(doc, "run.simulations", &mut errors);
    require(doc, "run.run_name", &mut errors);
    require_positive_integer(doc, "run.simulations", &mut errors);
    require_positive_integer(doc, "run.batches", &mut errors);

    require(doc, "geometry", &mut errors);
    require(doc, "geometry.shape", &mut errors);

    require(doc, "particle", &mut errors);
    for field in ["x", "y", "z", "vx", "vy", "vz"] {
        require(doc, &format!("particle.{field}"), &mut errors);
    }

    let mut charged = false;
    if require(doc, "particle.type", &mut errors) {
        match lookup(doc, "particle.type").and_then(Value::as_str) {
            Some("neutral") => {}
            Some("charged") => {
                charged = true;
                require(doc, "particle.charge", &mut errors);
                require(doc, "particle.mass", &mut errors);
            }
            other => errors.add(format!(
                "Particle type not supported: {}",
                other.unwrap_or("<not a string>")
            )),
        }
    }

    if let Some(shape) = lookup(doc, "geometry.shape") {
        match shape.as_str() {
            Some("regular_slab") => {
                single_material(doc, charged, &mut errors);
                require(doc, "geometry.x_init", &mut errors);
            }
            Some("sphere") => single_material(doc, charged, &mut errors),
            Some("finite_slab") => {
                single_material(doc, charged, &mut errors);
                require(doc, "geometry.x_length", &mut errors);
                require(doc, "geometry.y_length", &mut errors);
            }
            Some("double_slab") => {
                double_material(doc, charged, &mut errors);
                require(doc, "geometry.total_length", &mut errors);
                require(doc, "geometry.x_init", &mut errors);
            }
            Some(other) => errors.add(format!("Geometry not supported: {other}")),
            None => errors.add(format!("Geometry not supported: {shape}")),
        }
    }

    errors
}
