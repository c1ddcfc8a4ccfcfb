//! Shader uniform values.
//!
//! A uniform is one of a small fixed set of shapes. Each shape is its own
//! variant of [`UniformValue`], and the backend dispatches on the variant when
//! it applies the value, so no setter ever has to inspect an argument count.

use std::collections::BTreeMap;

use cgmath::Matrix4;

/// A single uniform value.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum UniformValue {
    /// `float`
    Float1(f32),
    /// `vec2`
    Float2([f32; 2]),
    /// `vec3`
    Float3([f32; 3]),
    /// `vec4`
    Float4([f32; 4]),
    /// `mat4`, column-major
    Mat4(Matrix4<f32>),
}

impl UniformValue {
    /// Number of `f32` components the value occupies.
    pub fn component_count(&self) -> usize {
        match self {
            UniformValue::Float1(_) => 1,
            UniformValue::Float2(_) => 2,
            UniformValue::Float3(_) => 3,
            UniformValue::Float4(_) => 4,
            UniformValue::Mat4(_) => 16,
        }
    }

    /// The value as a flat column-major float list.
    pub fn to_floats(&self) -> Vec<f32> {
        match self {
            UniformValue::Float1(v) => vec![*v],
            UniformValue::Float2(v) => v.to_vec(),
            UniformValue::Float3(v) => v.to_vec(),
            UniformValue::Float4(v) => v.to_vec(),
            UniformValue::Mat4(m) => {
                let columns: [[f32; 4]; 4] = (*m).into();
                columns.concat()
            }
        }
    }
}

impl From<f32> for UniformValue {
    fn from(value: f32) -> Self {
        UniformValue::Float1(value)
    }
}

impl From<[f32; 2]> for UniformValue {
    fn from(value: [f32; 2]) -> Self {
        UniformValue::Float2(value)
    }
}

impl From<[f32; 3]> for UniformValue {
    fn from(value: [f32; 3]) -> Self {
        UniformValue::Float3(value)
    }
}

impl From<[f32; 4]> for UniformValue {
    fn from(value: [f32; 4]) -> Self {
        UniformValue::Float4(value)
    }
}

impl From<Matrix4<f32>> for UniformValue {
    fn from(value: Matrix4<f32>) -> Self {
        UniformValue::Mat4(value)
    }
}

/// Backend side of a shader program: receives named uniform values.
pub trait UniformSink {
    /// Applies `value` to the uniform called `name`.
    fn set_uniform(&mut self, name: &str, value: &UniformValue);
}

/// Named uniforms waiting to be applied to a shader program.
///
/// Kept in name order so applying them is deterministic.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ShaderUniforms {
    values: BTreeMap<String, UniformValue>,
}

impl ShaderUniforms {
    /// Creates an empty uniform set.
    pub fn new() -> Self {
        ShaderUniforms::default()
    }

    /// Sets or replaces a uniform.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<UniformValue>) -> &mut Self {
        self.values.insert(name.into(), value.into());
        self
    }

    /// Looks up a uniform by name.
    pub fn get(&self, name: &str) -> Option<&UniformValue> {
        self.values.get(name)
    }

    /// Number of uniforms set.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether no uniform has been set.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Pushes every uniform into `sink`, in name order.
    pub fn apply(&self, sink: &mut impl UniformSink) {
        for (name, value) in &self.values {
            sink.set_uniform(name, value);
        }
    }
}
