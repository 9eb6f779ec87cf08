pub mod asset;
pub mod geometry;
pub mod loader;

#[cfg(test)]
pub mod fixture {
    /// A single indexed triangle in the XY plane facing +Z.
    pub fn triangle_buffer() -> Vec<u8> {
        let positions: [f32; 9] = [0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0];
        let normals: [f32; 9] = [0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 0.0, 0.0, 1.0];
        let indices: [u16; 4] = [0, 1, 2, 0];

        let mut buffer = vec![];
        buffer.extend_from_slice(bytemuck::cast_slice(&positions));
        buffer.extend_from_slice(bytemuck::cast_slice(&normals));
        buffer.extend_from_slice(bytemuck::cast_slice(&indices));
        buffer
    }

    pub fn triangle_gltf_json(buffer_uri: &str) -> String {
        format!(
            r#"{{
                "asset": {{ "version": "2.0" }},
                "buffers": [{{ "uri": "{buffer_uri}", "byteLength": 80 }}],
                "bufferViews": [
                    {{ "buffer": 0, "byteOffset": 0, "byteLength": 36 }},
                    {{ "buffer": 0, "byteOffset": 36, "byteLength": 36 }},
                    {{ "buffer": 0, "byteOffset": 72, "byteLength": 6 }}
                ],
                "accessors": [
                    {{
                        "bufferView": 0,
                        "componentType": 5126,
                        "count": 3,
                        "type": "VEC3",
                        "min": [0.0, 0.0, 0.0],
                        "max": [1.0, 1.0, 0.0]
                    }},
                    {{ "bufferView": 1, "componentType": 5126, "count": 3, "type": "VEC3" }},
                    {{ "bufferView": 2, "componentType": 5123, "count": 3, "type": "SCALAR" }}
                ],
                "meshes": [{{
                    "name": "triangle",
                    "primitives": [{{ "attributes": {{ "POSITION": 0, "NORMAL": 1 }}, "indices": 2 }}]
                }}]
            }}"#
        )
    }
}
