use crate::{FrameUniforms, SceneState};

/// Derive all shader inputs of a frame from the scene.
///
/// Lights are transformed into view space so that the shaders can do all
/// lighting computations relative to the eye at the origin.
#[must_use]
pub fn compose_frame(scene: &SceneState, aspect_ratio: f32) -> FrameUniforms {
    let camera = scene.camera();
    let projection = camera.perspective_matrix(aspect_ratio);
    let view = camera.look_at_matrix();

    let model_view = view * scene.teapot().model_matrix();
    let normal = model_view.inverse().transpose();

    let [light0, light1] = scene.lights();
    let material = scene.teapot().material();

    FrameUniforms {
        model_view,
        projection,
        normal,
        light0_position: view * light0.position_vec4(),
        light0_color: light0.color_vec4(),
        light1_position: view * light1.position_vec4(),
        light1_color: light1.color_vec4(),
        ambient: material.ambient(),
        diffuse: material.diffuse(),
        specular: material.specular(),
        shininess: material.shininess(),
        padding: [0.0; 3],
    }
}
