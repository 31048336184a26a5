use crate::entities::{CuttingParameters, Material, Piece};
use crate::error::{OptimizeError, OptimizeResult};
use crate::io::ext_repr::{CutItem, ExtCuttingParameters, ExtMaterial, OptimizeRequest};
use itertools::Itertools;
use log::warn;

/// Internal representation of an [`OptimizeRequest`]
#[derive(Clone, Debug)]
pub struct CuttingInstance {
    pub project_name: String,
    pub pieces: Vec<Piece>,
    pub materials: Vec<Material>,
    pub params: CuttingParameters,
}

/// Converts an external request into a [`CuttingInstance`].
///
/// Cuts carry no identifier of their own, piece `i` (1-based, in request order) is named `c{i}`.
pub fn import_request(request: &OptimizeRequest) -> OptimizeResult<CuttingInstance> {
    let materials = request
        .materials
        .iter()
        .map(import_material)
        .collect::<OptimizeResult<Vec<_>>>()?;

    if let Some(code) = materials.iter().map(|m| &m.code).duplicates().next() {
        return Err(OptimizeError::InvalidMaterial {
            material: code.clone(),
            reason: "material code is listed more than once".to_string(),
        });
    }

    let pieces = request
        .cuts
        .iter()
        .enumerate()
        .map(|(i, cut)| import_cut(format!("c{}", i + 1), cut))
        .collect::<OptimizeResult<Vec<_>>>()?;

    let unused = materials
        .iter()
        .filter(|m| !pieces.iter().any(|p| p.material == m.code))
        .map(|m| m.code.as_str())
        .collect_vec();
    if !unused.is_empty() {
        warn!("[IO] materials not referenced by any cut: {}", unused.join(", "));
    }

    Ok(CuttingInstance {
        project_name: request.project_name.clone(),
        pieces,
        materials,
        params: import_cutting_parameters(&request.cutting_parameters),
    })
}

pub fn import_material(ext_material: &ExtMaterial) -> OptimizeResult<Material> {
    let material = Material::new(ext_material.code.clone(), ext_material.width, ext_material.height)
        .with_cost(ext_material.price)
        .with_thickness(ext_material.thickness)
        .with_grain(ext_material.grain_direction);
    material.validate()?;
    Ok(material)
}

pub fn import_cut(id: String, cut: &CutItem) -> OptimizeResult<Piece> {
    let piece = Piece::new(id, cut.material.clone(), cut.width, cut.height)
        .with_quantity(cut.quantity)
        .with_rotation(cut.allow_rotation)
        .with_priority(cut.priority)
        .with_grain(cut.force_grain)
        .with_label(cut.label.clone());
    piece.validate()?;
    Ok(piece)
}

pub fn import_cutting_parameters(ext: &ExtCuttingParameters) -> CuttingParameters {
    CuttingParameters {
        kerf: ext.kerf,
        top_trim: ext.top_trim,
        bottom_trim: ext.bottom_trim,
        left_trim: ext.left_trim,
        right_trim: ext.right_trim,
    }
}
