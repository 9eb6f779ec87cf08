use anyhow::Result;
use cgmath::{Matrix, Rotation3, SquareMatrix, Zero};

use crate::data::projection::PerspectiveProjection;
use crate::error::Error;

#[derive(Copy, Clone, Debug)]
pub struct Transform {
    pub translation: cgmath::Vector3<f32>,
    pub rotation: cgmath::Quaternion<f32>,
    pub scale: cgmath::Vector3<f32>,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            translation: cgmath::Vector3::zero(),
            rotation: cgmath::Quaternion::new(1.0, 0.0, 0.0, 0.0),
            scale: cgmath::Vector3 {
                x: 1.0,
                y: 1.0,
                z: 1.0,
            },
        }
    }
}

impl From<Transform> for cgmath::Matrix4<f32> {
    fn from(value: Transform) -> Self {
        cgmath::Matrix4::from_translation(value.translation)
            * cgmath::Matrix4::from(value.rotation)
            * cgmath::Matrix4::from_nonuniform_scale(value.scale.x, value.scale.y, value.scale.z)
    }
}

/// Fixed parameters of the spinning-model scene.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TransformConfiguration {
    pub model_scale: f32,
    pub camera_distance: f32,
    pub fovy: cgmath::Rad<f32>,
    pub znear: f32,
    pub zfar: f32,
}

impl Default for TransformConfiguration {
    fn default() -> Self {
        Self {
            model_scale: 2.0,
            camera_distance: 2.0,
            fovy: cgmath::Deg(60.0).into(),
            znear: 0.1,
            zfar: 100.0,
        }
    }
}

impl TransformConfiguration {
    pub fn validate(&self) -> Result<()> {
        if !(self.model_scale > 0.0) {
            return Err(Error::configuration(format!(
                "The model scale must be positive: {}",
                self.model_scale
            ))
            .into());
        }

        if !(self.znear > 0.0 && self.znear < self.zfar) {
            return Err(Error::configuration(format!(
                "The clip planes must satisfy 0 < near < far: near = {}, far = {}",
                self.znear, self.zfar
            ))
            .into());
        }

        if !(self.fovy.0 > 0.0 && self.fovy.0 < std::f32::consts::PI) {
            return Err(Error::configuration(format!(
                "The vertical field of view must be between 0 and 180 degrees: {:?}",
                cgmath::Deg::from(self.fovy)
            ))
            .into());
        }

        Ok(())
    }

    /// Object to world: rotation about +Y by `-elapsed_time` applied after a uniform scale.
    pub fn model_transform(&self, elapsed_time: f32) -> Transform {
        Transform {
            rotation: cgmath::Quaternion::from_angle_y(cgmath::Rad(-elapsed_time)),
            scale: cgmath::Vector3::new(self.model_scale, self.model_scale, self.model_scale),
            ..Default::default()
        }
    }

    /// World to camera: the camera sits on +Z looking down -Z.
    pub fn view_transform(&self) -> Transform {
        Transform {
            translation: cgmath::Vector3::new(0.0, 0.0, -self.camera_distance),
            ..Default::default()
        }
    }

    pub fn projection(&self, aspect_ratio: f32) -> PerspectiveProjection {
        PerspectiveProjection {
            aspect_ratio,
            fovy: self.fovy,
            znear: self.znear,
            zfar: self.zfar,
        }
    }
}

/// Every matrix a frame needs, derived from one elapsed time and one aspect ratio.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FrameTransforms {
    pub model_matrix: cgmath::Matrix4<f32>,
    pub view_projection_matrix: cgmath::Matrix4<f32>,
    pub normal_matrix: cgmath::Matrix3<f32>,
}

impl FrameTransforms {
    pub fn compute(
        config: &TransformConfiguration,
        elapsed_time: f32,
        aspect_ratio: f32,
    ) -> Self {
        let model_matrix = cgmath::Matrix4::from(config.model_transform(elapsed_time));
        let view_matrix = cgmath::Matrix4::from(config.view_transform());
        let projection_matrix = cgmath::Matrix4::from(config.projection(aspect_ratio));

        Self {
            model_matrix,
            view_projection_matrix: projection_matrix * view_matrix,
            normal_matrix: normal_matrix(&model_matrix),
        }
    }

    #[cfg(test)]
    pub fn clip_position(&self, object_position: cgmath::Point3<f32>) -> cgmath::Vector4<f32> {
        self.view_projection_matrix
            * self.model_matrix
            * cgmath::Vector4::new(object_position.x, object_position.y, object_position.z, 1.0)
    }
}

/// Inverse-transpose of the upper-left 3x3 of `model_matrix`, rescaled to a unit
/// determinant so a uniform scale leaves exactly the rotation behind.
pub fn normal_matrix(model_matrix: &cgmath::Matrix4<f32>) -> cgmath::Matrix3<f32> {
    let linear = cgmath::Matrix3::from_cols(
        model_matrix.x.truncate(),
        model_matrix.y.truncate(),
        model_matrix.z.truncate(),
    );

    let inverse_transpose = match linear.invert() {
        Some(inverse) => inverse.transpose(),
        None => return cgmath::Matrix3::identity(),
    };

    let scale = inverse_transpose.determinant().cbrt();
    inverse_transpose * (1.0 / scale)
}
