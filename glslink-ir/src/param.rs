//! Program parameters and parameter lists.
use bitflags::bitflags;
use indexmap::IndexMap;
use smallvec::SmallVec;
use smol_str::SmolStr;

bitflags! {
    /// Qualifier bits attached to a parameter declaration.
    pub struct ParameterFlags: u32 {
        const CENTROID = 1 << 0;
        const INVARIANT = 1 << 1;
    }
}

impl Default for ParameterFlags {
    fn default() -> ParameterFlags {
        ParameterFlags::empty()
    }
}

/// Data types of the shading-language surface.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum DataType {
    Float,
    Vec2,
    Vec3,
    Vec4,
    Int,
    IVec2,
    IVec3,
    IVec4,
    Bool,
    BVec2,
    BVec3,
    BVec4,
    Mat2,
    Mat3,
    Mat4,
    Sampler1D,
    Sampler2D,
    Sampler3D,
    SamplerCube,
    Sampler2DRect,
    Sampler1DShadow,
    Sampler2DShadow,
}

impl DataType {
    /// Number of scalar components a value of this type occupies.
    pub fn component_count(self) -> u32 {
        match self {
            DataType::Float | DataType::Int | DataType::Bool => 1,
            DataType::Vec2 | DataType::IVec2 | DataType::BVec2 => 2,
            DataType::Vec3 | DataType::IVec3 | DataType::BVec3 => 3,
            DataType::Vec4 | DataType::IVec4 | DataType::BVec4 => 4,
            DataType::Mat2 => 4,
            DataType::Mat3 => 9,
            DataType::Mat4 => 16,
            DataType::Sampler1D
            | DataType::Sampler2D
            | DataType::Sampler3D
            | DataType::SamplerCube
            | DataType::Sampler2DRect
            | DataType::Sampler1DShadow
            | DataType::Sampler2DShadow => 1,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum ParameterKind {
    Uniform,
    Sampler,
    StateVar,
    Constant,
    Attribute,
    Varying,
}

/// A named program parameter.
#[derive(Clone, Debug, PartialEq)]
pub struct Parameter {
    pub name: SmolStr,
    pub kind: ParameterKind,
    pub data_type: DataType,
    /// Size in scalar components. Every slot of a multi-slot declaration
    /// carries the full size.
    pub size: u32,
    pub flags: ParameterFlags,
    /// Initial values. A sampler parameter stores its texture unit in
    /// `values[0]`.
    pub values: SmallVec<[f32; 4]>,
    /// Resolved attribute slot; `None` marks a built-in attribute that is
    /// not queryable as a generic binding.
    pub location: Option<u32>,
    pub state_indexes: SmallVec<[u32; 6]>,
    pub used: bool,
    pub initialized: bool,
}

impl Parameter {
    pub fn new(name: impl Into<SmolStr>, kind: ParameterKind, data_type: DataType) -> Parameter {
        Parameter {
            name: name.into(),
            kind,
            data_type,
            size: data_type.component_count(),
            flags: ParameterFlags::empty(),
            values: SmallVec::new(),
            location: None,
            state_indexes: SmallVec::new(),
            used: false,
            initialized: false,
        }
    }
}

/// Ordered parameter list with by-name lookup.
///
/// Each entry covers one 4-component register slot; a declaration wider
/// than a slot appends one entry per slot so instruction indexes map 1:1
/// onto list indexes. Lookup returns the first slot.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ParameterList {
    params: Vec<Parameter>,
    by_name: IndexMap<SmolStr, u32>,
}

impl ParameterList {
    pub fn new() -> ParameterList {
        ParameterList::default()
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    pub fn as_slice(&self) -> &[Parameter] {
        &self.params
    }

    pub fn get(&self, index: usize) -> Option<&Parameter> {
        self.params.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Parameter> {
        self.params.get_mut(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Parameter> {
        self.params.iter()
    }

    /// First slot of the parameter with the given name.
    pub fn find(&self, name: &str) -> Option<u32> {
        self.by_name.get(name).copied()
    }

    /// Appends a parameter, one entry per occupied register slot, and
    /// returns its first slot. Re-adding the same `(name, kind)` returns
    /// the existing slot instead.
    pub fn add(&mut self, param: Parameter) -> u32 {
        if let Some(&first) = self.by_name.get(&param.name) {
            if self.params[first as usize].kind == param.kind {
                return first;
            }
        }
        let first = self.params.len() as u32;
        let slot_count = (param.size.max(1) + 3) / 4;
        for _ in 1..slot_count {
            self.params.push(param.clone());
        }
        self.by_name.insert(param.name.clone(), first);
        self.params.push(param);
        first
    }

    pub fn add_varying(
        &mut self,
        name: impl Into<SmolStr>,
        size: u32,
        data_type: DataType,
        flags: ParameterFlags,
    ) -> u32 {
        let mut param = Parameter::new(name, ParameterKind::Varying, data_type);
        param.size = size;
        param.flags = flags;
        param.used = true;
        self.add(param)
    }

    pub fn add_attribute(
        &mut self,
        name: impl Into<SmolStr>,
        size: u32,
        data_type: DataType,
        location: Option<u32>,
    ) -> u32 {
        let mut param = Parameter::new(name, ParameterKind::Attribute, data_type);
        param.size = size;
        param.location = location;
        param.used = true;
        self.add(param)
    }

    pub fn add_uniform(&mut self, name: impl Into<SmolStr>, size: u32, data_type: DataType) -> u32 {
        let mut param = Parameter::new(name, ParameterKind::Uniform, data_type);
        param.size = size;
        param.used = true;
        self.add(param)
    }

    pub fn add_sampler(&mut self, name: impl Into<SmolStr>, data_type: DataType, unit: u32) -> u32 {
        let mut param = Parameter::new(name, ParameterKind::Sampler, data_type);
        param.values.push(unit as f32);
        param.used = true;
        self.add(param)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn multi_slot_parameters_span_consecutive_entries() {
        let mut list = ParameterList::new();
        let first = list.add_uniform("mvp", 16, DataType::Mat4);
        assert_eq!(first, 0);
        assert_eq!(list.len(), 4);
        let next = list.add_uniform("color", 4, DataType::Vec4);
        assert_eq!(next, 4);
        assert_eq!(list.find("mvp"), Some(0));
        assert_eq!(list.find("color"), Some(4));
        for slot in 0..4 {
            assert_eq!(list.as_slice()[slot].name, "mvp");
            assert_eq!(list.as_slice()[slot].size, 16);
        }
    }

    #[test]
    fn add_is_idempotent_per_name_and_kind() {
        let mut list = ParameterList::new();
        let a = list.add_varying("v", 4, DataType::Vec4, ParameterFlags::empty());
        let b = list.add_varying("v", 4, DataType::Vec4, ParameterFlags::empty());
        assert_eq!(a, b);
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn lookup_misses_return_none() {
        let list = ParameterList::new();
        assert_eq!(list.find("nope"), None);
    }
}
