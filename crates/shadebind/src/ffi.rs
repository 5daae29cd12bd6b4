// SPDX-License-Identifier: MIT OR Apache-2.0
//! `extern "C"` surface.
//!
//! Every function takes the caller's `client_id` first, resolves raw `u32`
//! handles against one process-wide [`Registry`] and never fails loudly:
//! errors are logged and turned into [`SHADEBIND_NOT_FOUND`] or a no-op.
//!
//! Log callbacks run while the registry lock is held and must not call back
//! into this library.

use crate::config::BindingConfig;
use crate::error::{BindingError, Result};
use crate::image::{ImageError, PixelData};
use crate::logging::{self, LogSink};
use crate::registry::{kind_for_tag, Registry};
use crate::scene::SceneHandle;
use crate::shader::ShaderHandle;
use parking_lot::Mutex;
use shadebind_graph::nodes::enums::{
    MappingAxis, MappingProjection, MappingType, TransformComponent,
};
use shadebind_graph::{AttributeValue, MemberError, NodeId, ShaderNodeKind};
use std::ffi::{CStr, CString};
use std::os::raw::c_char;
use std::sync::Arc;

/// Returned in place of a handle or slot when the call failed
pub const SHADEBIND_NOT_FOUND: u32 = u32::MAX;

/// Host log callback; receives one NUL terminated line per event
pub type HostLogCallback = extern "C" fn(message: *const c_char);

// ============================================================
// Global state
// ============================================================

struct Runtime {
    registry: Registry,
    config: BindingConfig,
}

impl Runtime {
    fn start() -> Self {
        let (config, config_error) = BindingConfig::from_env();
        logging::init_logging(&config);
        if let Some(err) = config_error {
            tracing::warn!("Using default config: {err}");
        }

        let mut registry = Registry::new();
        if config.create_default_shaders {
            if let Err(err) = registry.create_default_shaders(0) {
                tracing::warn!("Could not create default shaders: {err}");
            }
        }
        tracing::info!("shadebind v{} ready", env!("CARGO_PKG_VERSION"));
        Self { registry, config }
    }

    fn run<T>(
        &mut self,
        client_id: u32,
        op: &str,
        f: impl FnOnce(&mut Registry) -> Result<T>,
    ) -> Option<T> {
        match f(&mut self.registry) {
            Ok(value) => Some(value),
            Err(err) => {
                if self.config.strict {
                    tracing::warn!(client_id, "{op}: {err}");
                } else {
                    tracing::debug!(client_id, "{op}: {err}");
                }
                None
            }
        }
    }
}

static RUNTIME: Mutex<Option<Runtime>> = parking_lot::const_mutex(None);

/// Run `f` against the runtime, starting it on first use
fn with_runtime<R>(f: impl FnOnce(&mut Runtime) -> R) -> R {
    let mut guard = RUNTIME.lock();
    let runtime = guard.get_or_insert_with(Runtime::start);
    f(runtime)
}

fn dispatch<T>(client_id: u32, op: &str, f: impl FnOnce(&mut Registry) -> Result<T>) -> Option<T> {
    with_runtime(|runtime| runtime.run(client_id, op, f))
}

// ============================================================
// Argument conversion
// ============================================================

/// Borrow a C string as `&str`.
///
/// # Safety
/// `ptr` must be null or point to a NUL terminated string that outlives `'a`.
unsafe fn c_str<'a>(ptr: *const c_char, what: &'static str) -> Result<&'a str> {
    if ptr.is_null() {
        return Err(BindingError::InvalidArgument(what));
    }
    // SAFETY: non-null and NUL terminated per this function's contract.
    unsafe { CStr::from_ptr(ptr) }
        .to_str()
        .map_err(|_| BindingError::InvalidArgument(what))
}

/// Borrow `width * height * depth * channels` pixels.
///
/// # Safety
/// `ptr` must be null or valid for reads of that many `T` for `'a`.
unsafe fn pixels<'a, T>(ptr: *const T, dims: [u32; 4]) -> Result<&'a [T]> {
    if ptr.is_null() {
        return Err(BindingError::InvalidArgument("pixel buffer"));
    }
    let [width, height, depth, channels] = dims;
    let len = dims
        .iter()
        .try_fold(1usize, |acc, dim| acc.checked_mul(*dim as usize))
        .filter(|len| {
            len.checked_mul(size_of::<T>())
                .is_some_and(|bytes| bytes <= isize::MAX as usize)
        })
        .ok_or(ImageError::Overflow { width, height, depth, channels })?;
    // SAFETY: non-null, and the caller guarantees `len` readable elements.
    Ok(unsafe { std::slice::from_raw_parts(ptr, len) })
}

fn decode<E: TryFrom<i32, Error = i32>>(member: &str, code: i32) -> Result<E> {
    E::try_from(code).map_err(|code| {
        MemberError::InvalidCode {
            member: member.to_string(),
            code,
        }
        .into()
    })
}

fn handle_or_sentinel(value: Option<u32>) -> u32 {
    value.unwrap_or(SHADEBIND_NOT_FOUND)
}

// ============================================================
// Lifetime and logging
// ============================================================

/// Start the library if needed. Other calls start it lazily too.
#[no_mangle]
pub extern "C" fn shadebind_initialise(client_id: u32) {
    with_runtime(|runtime| {
        tracing::info!(client_id, shaders = runtime.registry.shader_count(), "Client initialised");
    });
}

/// Drop every shader, scene, image and host logger.
#[no_mangle]
pub extern "C" fn shadebind_shutdown() {
    let mut guard = RUNTIME.lock();
    if let Some(mut runtime) = guard.take() {
        runtime.registry.clear();
        tracing::info!("shadebind shut down");
    }
    logging::clear_host_loggers();
}

/// Route log lines tagged with `client_id` to `callback`; null unregisters.
#[no_mangle]
pub extern "C" fn shadebind_set_logger(client_id: u32, callback: Option<HostLogCallback>) {
    let sink = callback.map(|callback| -> LogSink {
        Arc::new(move |line: &str| {
            let line = CString::new(line.replace('\0', " ")).unwrap_or_default();
            callback(line.as_ptr());
        })
    });
    logging::set_host_logger(client_id, sink);
}

// ============================================================
// Shaders and scenes
// ============================================================

/// Create a shader and return its handle, or [`SHADEBIND_NOT_FOUND`] when
/// the shader table is full.
#[no_mangle]
pub extern "C" fn shadebind_create_shader(client_id: u32) -> u32 {
    handle_or_sentinel(dispatch(client_id, "create_shader", |reg| {
        reg.create_shader(client_id).map(ShaderHandle::index)
    }))
}

/// Create a scene and return its handle, or [`SHADEBIND_NOT_FOUND`] when
/// the scene table is full.
#[no_mangle]
pub extern "C" fn shadebind_create_scene(client_id: u32) -> u32 {
    handle_or_sentinel(dispatch(client_id, "create_scene", |reg| {
        reg.create_scene(client_id).map(SceneHandle::index)
    }))
}

/// Add a shader to a scene, returning its slot or [`SHADEBIND_NOT_FOUND`].
#[no_mangle]
pub extern "C" fn shadebind_scene_add_shader(client_id: u32, scene_id: u32, shader_id: u32) -> u32 {
    handle_or_sentinel(dispatch(client_id, "scene_add_shader", |reg| {
        let scene = reg.resolve_scene(scene_id)?;
        let shader = reg.resolve_shader(shader_id)?;
        reg.scene_add_shader(scene, shader)
    }))
}

/// Mark a shader as needing an update in a scene.
#[no_mangle]
pub extern "C" fn shadebind_scene_tag_shader(client_id: u32, scene_id: u32, shader_id: u32) {
    dispatch(client_id, "scene_tag_shader", |reg| {
        let scene = reg.resolve_scene(scene_id)?;
        let shader = reg.resolve_shader(shader_id)?;
        reg.scene_tag_shader(scene, shader)
    });
}

/// Slot of a shader in a scene, or [`SHADEBIND_NOT_FOUND`].
#[no_mangle]
pub extern "C" fn shadebind_scene_shader_id(client_id: u32, scene_id: u32, shader_id: u32) -> u32 {
    handle_or_sentinel(dispatch(client_id, "scene_shader_id", |reg| {
        let scene = reg.resolve_scene(scene_id)?;
        let shader = reg.resolve_shader(shader_id)?;
        reg.scene_shader_id(scene, shader)
    }))
}

/// Replace a shader's graph with a fresh one.
#[no_mangle]
pub extern "C" fn shadebind_shader_new_graph(client_id: u32, shader_id: u32) {
    dispatch(client_id, "shader_new_graph", |reg| {
        let shader = reg.resolve_shader(shader_id)?;
        reg.new_graph(shader)
    });
}

/// Set a shader's name.
///
/// # Safety
/// `name` must be null or a valid NUL terminated string.
#[no_mangle]
pub unsafe extern "C" fn shadebind_shader_set_name(
    client_id: u32,
    shader_id: u32,
    name: *const c_char,
) {
    dispatch(client_id, "shader_set_name", |reg| {
        let shader = reg.resolve_shader(shader_id)?;
        // SAFETY: forwarded from this function's contract.
        let name = unsafe { c_str(name, "name") }?;
        reg.set_shader_name(shader, name)
    });
}

/// Toggle multiple importance sampling; only `1` enables it.
#[no_mangle]
pub extern "C" fn shadebind_shader_set_use_mis(client_id: u32, shader_id: u32, use_mis: u32) {
    dispatch(client_id, "shader_set_use_mis", |reg| {
        let shader = reg.resolve_shader(shader_id)?;
        reg.set_use_mis(shader, use_mis == 1)
    });
}

/// Toggle transparent shadows; only `1` enables them.
#[no_mangle]
pub extern "C" fn shadebind_shader_set_use_transparent_shadow(
    client_id: u32,
    shader_id: u32,
    use_transparent_shadow: u32,
) {
    dispatch(client_id, "shader_set_use_transparent_shadow", |reg| {
        let shader = reg.resolve_shader(shader_id)?;
        reg.set_use_transparent_shadow(shader, use_transparent_shadow == 1)
    });
}

/// Toggle heterogeneous volume sampling; only `1` enables it.
#[no_mangle]
pub extern "C" fn shadebind_shader_set_heterogeneous_volume(
    client_id: u32,
    shader_id: u32,
    heterogeneous_volume: u32,
) {
    dispatch(client_id, "shader_set_heterogeneous_volume", |reg| {
        let shader = reg.resolve_shader(shader_id)?;
        reg.set_heterogeneous_volume(shader, heterogeneous_volume == 1)
    });
}

// ============================================================
// Nodes
// ============================================================

/// Add a node of type `shn_type`, returning its id or [`SHADEBIND_NOT_FOUND`].
#[no_mangle]
pub extern "C" fn shadebind_add_shader_node(client_id: u32, shader_id: u32, shn_type: u32) -> u32 {
    handle_or_sentinel(dispatch(client_id, "add_shader_node", |reg| {
        let shader = reg.resolve_shader(shader_id)?;
        let kind = kind_for_tag(shn_type)?;
        Ok(reg.add_shader_node(shader, kind)?.0)
    }))
}

/// Shared body of the `set_attribute_*` functions.
///
/// # Safety
/// `name` must be null or a valid NUL terminated string.
unsafe fn set_attribute(
    client_id: u32,
    shader_id: u32,
    node_id: u32,
    name: *const c_char,
    value: impl FnOnce() -> Result<AttributeValue>,
) {
    dispatch(client_id, "shadernode_set_attribute", |reg| {
        let shader = reg.resolve_shader(shader_id)?;
        // SAFETY: forwarded from this function's contract.
        let name = unsafe { c_str(name, "attribute name") }?;
        reg.set_attribute(shader, NodeId(node_id), name, &value()?)
    });
}

/// Set an int input.
///
/// # Safety
/// `attribute_name` must be null or a valid NUL terminated string.
#[no_mangle]
pub unsafe extern "C" fn shadebind_shadernode_set_attribute_int(
    client_id: u32,
    shader_id: u32,
    shnode_id: u32,
    attribute_name: *const c_char,
    value: i32,
) {
    // SAFETY: forwarded from this function's contract.
    unsafe {
        set_attribute(client_id, shader_id, shnode_id, attribute_name, || {
            Ok(AttributeValue::Int(value))
        })
    }
}

/// Set a float input.
///
/// # Safety
/// `attribute_name` must be null or a valid NUL terminated string.
#[no_mangle]
pub unsafe extern "C" fn shadebind_shadernode_set_attribute_float(
    client_id: u32,
    shader_id: u32,
    shnode_id: u32,
    attribute_name: *const c_char,
    value: f32,
) {
    // SAFETY: forwarded from this function's contract.
    unsafe {
        set_attribute(client_id, shader_id, shnode_id, attribute_name, || {
            Ok(AttributeValue::Float(value))
        })
    }
}

/// Set a vector or color input.
///
/// # Safety
/// `attribute_name` must be null or a valid NUL terminated string.
#[no_mangle]
pub unsafe extern "C" fn shadebind_shadernode_set_attribute_vec(
    client_id: u32,
    shader_id: u32,
    shnode_id: u32,
    attribute_name: *const c_char,
    x: f32,
    y: f32,
    z: f32,
) {
    // SAFETY: forwarded from this function's contract.
    unsafe {
        set_attribute(client_id, shader_id, shnode_id, attribute_name, || {
            Ok(AttributeValue::Vector([x, y, z]))
        })
    }
}

/// Set a string input.
///
/// # Safety
/// `attribute_name` and `value` must be null or valid NUL terminated strings.
#[no_mangle]
pub unsafe extern "C" fn shadebind_shadernode_set_attribute_string(
    client_id: u32,
    shader_id: u32,
    shnode_id: u32,
    attribute_name: *const c_char,
    value: *const c_char,
) {
    // SAFETY: forwarded from this function's contract.
    let value = unsafe { c_str(value, "attribute value") };
    // SAFETY: forwarded from this function's contract.
    unsafe {
        set_attribute(client_id, shader_id, shnode_id, attribute_name, move || {
            Ok(AttributeValue::String(value?.to_string()))
        })
    }
}

/// Shared body of the typed member setters.
///
/// # Safety
/// `member_name` must be null or a valid NUL terminated string.
unsafe fn set_member(
    client_id: u32,
    op: &str,
    shader_id: u32,
    shnode_id: u32,
    shn_type: u32,
    member_name: *const c_char,
    write: impl FnOnce(&mut Registry, ShaderHandle, NodeId, ShaderNodeKind, &str) -> Result<()>,
) {
    dispatch(client_id, op, |reg| {
        let shader = reg.resolve_shader(shader_id)?;
        let kind = kind_for_tag(shn_type)?;
        // SAFETY: forwarded from this function's contract.
        let member = unsafe { c_str(member_name, "member name") }?;
        write(reg, shader, NodeId(shnode_id), kind, member)
    });
}

/// Set a bool member.
///
/// # Safety
/// `member_name` must be null or a valid NUL terminated string.
#[no_mangle]
pub unsafe extern "C" fn shadebind_shadernode_set_member_bool(
    client_id: u32,
    shader_id: u32,
    shnode_id: u32,
    shn_type: u32,
    member_name: *const c_char,
    value: bool,
) {
    // SAFETY: forwarded from this function's contract.
    unsafe {
        set_member(
            client_id,
            "shadernode_set_member_bool",
            shader_id,
            shnode_id,
            shn_type,
            member_name,
            |reg, shader, node, kind, member| {
                reg.set_member_bool(shader, node, kind, member, value)
            },
        )
    }
}

/// Set an int member.
///
/// # Safety
/// `member_name` must be null or a valid NUL terminated string.
#[no_mangle]
pub unsafe extern "C" fn shadebind_shadernode_set_member_int(
    client_id: u32,
    shader_id: u32,
    shnode_id: u32,
    shn_type: u32,
    member_name: *const c_char,
    value: i32,
) {
    // SAFETY: forwarded from this function's contract.
    unsafe {
        set_member(
            client_id,
            "shadernode_set_member_int",
            shader_id,
            shnode_id,
            shn_type,
            member_name,
            |reg, shader, node, kind, member| reg.set_member_int(shader, node, kind, member, value),
        )
    }
}

/// Set a float member.
///
/// # Safety
/// `member_name` must be null or a valid NUL terminated string.
#[no_mangle]
pub unsafe extern "C" fn shadebind_shadernode_set_member_float(
    client_id: u32,
    shader_id: u32,
    shnode_id: u32,
    shn_type: u32,
    member_name: *const c_char,
    value: f32,
) {
    // SAFETY: forwarded from this function's contract.
    unsafe {
        set_member(
            client_id,
            "shadernode_set_member_float",
            shader_id,
            shnode_id,
            shn_type,
            member_name,
            |reg, shader, node, kind, member| {
                reg.set_member_float(shader, node, kind, member, value)
            },
        )
    }
}

/// Set a three component member.
///
/// # Safety
/// `member_name` must be null or a valid NUL terminated string.
#[no_mangle]
pub unsafe extern "C" fn shadebind_shadernode_set_member_vec(
    client_id: u32,
    shader_id: u32,
    shnode_id: u32,
    shn_type: u32,
    member_name: *const c_char,
    x: f32,
    y: f32,
    z: f32,
) {
    // SAFETY: forwarded from this function's contract.
    unsafe {
        set_member(
            client_id,
            "shadernode_set_member_vec",
            shader_id,
            shnode_id,
            shn_type,
            member_name,
            |reg, shader, node, kind, member| {
                reg.set_member_vec(shader, node, kind, member, [x, y, z])
            },
        )
    }
}

/// Set row `index` of a four component array member.
///
/// # Safety
/// `member_name` must be null or a valid NUL terminated string.
#[no_mangle]
pub unsafe extern "C" fn shadebind_shadernode_set_member_vec4_at_index(
    client_id: u32,
    shader_id: u32,
    shnode_id: u32,
    shn_type: u32,
    member_name: *const c_char,
    x: f32,
    y: f32,
    z: f32,
    w: f32,
    index: i32,
) {
    // SAFETY: forwarded from this function's contract.
    unsafe {
        set_member(
            client_id,
            "shadernode_set_member_vec4_at_index",
            shader_id,
            shnode_id,
            shn_type,
            member_name,
            |reg, shader, node, kind, member| {
                reg.set_member_vec4_at_index(shader, node, kind, member, [x, y, z, w], index)
            },
        )
    }
}

/// Set an enum member by value name; unknown values leave the node as is.
///
/// # Safety
/// `enum_name` and `value` must be null or valid NUL terminated strings.
#[no_mangle]
pub unsafe extern "C" fn shadebind_shadernode_set_enum(
    client_id: u32,
    shader_id: u32,
    shnode_id: u32,
    shn_type: u32,
    enum_name: *const c_char,
    value: *const c_char,
) {
    // SAFETY: forwarded from this function's contract.
    let value = unsafe { c_str(value, "enum value") };
    // SAFETY: forwarded from this function's contract.
    unsafe {
        set_member(
            client_id,
            "shadernode_set_enum",
            shader_id,
            shnode_id,
            shn_type,
            enum_name,
            |reg, shader, node, kind, member| reg.set_enum(shader, node, kind, member, value?),
        )
    }
}

/// Set translation (0), rotation (1) or scale (2) of a mapping node.
#[no_mangle]
pub extern "C" fn shadebind_shadernode_texmapping_set_transformation(
    client_id: u32,
    shader_id: u32,
    shnode_id: u32,
    shn_type: u32,
    transform_type: i32,
    x: f32,
    y: f32,
    z: f32,
) {
    dispatch(client_id, "shadernode_texmapping_set_transformation", |reg| {
        let shader = reg.resolve_shader(shader_id)?;
        let kind = kind_for_tag(shn_type)?;
        let component: TransformComponent = decode("transformation", transform_type)?;
        tracing::trace!(client_id, %component, "Setting texture mapping transform");
        reg.texmapping_set_transformation(shader, NodeId(shnode_id), kind, component, [x, y, z])
    });
}

/// Set the source axis of each component of a mapping node.
#[no_mangle]
pub extern "C" fn shadebind_shadernode_texmapping_set_mapping(
    client_id: u32,
    shader_id: u32,
    shnode_id: u32,
    shn_type: u32,
    x: i32,
    y: i32,
    z: i32,
) {
    dispatch(client_id, "shadernode_texmapping_set_mapping", |reg| {
        let shader = reg.resolve_shader(shader_id)?;
        let kind = kind_for_tag(shn_type)?;
        let axes: [MappingAxis; 3] = [
            decode("x_mapping", x)?,
            decode("y_mapping", y)?,
            decode("z_mapping", z)?,
        ];
        reg.texmapping_set_mapping(shader, NodeId(shnode_id), kind, axes)
    });
}

/// Set the projection of a mapping node.
#[no_mangle]
pub extern "C" fn shadebind_shadernode_texmapping_set_projection(
    client_id: u32,
    shader_id: u32,
    shnode_id: u32,
    shn_type: u32,
    tm_projection: i32,
) {
    dispatch(client_id, "shadernode_texmapping_set_projection", |reg| {
        let shader = reg.resolve_shader(shader_id)?;
        let kind = kind_for_tag(shn_type)?;
        let projection: MappingProjection = decode("projection", tm_projection)?;
        reg.texmapping_set_projection(shader, NodeId(shnode_id), kind, projection)
    });
}

/// Set what a mapping node transforms.
#[no_mangle]
pub extern "C" fn shadebind_shadernode_texmapping_set_type(
    client_id: u32,
    shader_id: u32,
    shnode_id: u32,
    shn_type: u32,
    tm_type: i32,
) {
    dispatch(client_id, "shadernode_texmapping_set_type", |reg| {
        let shader = reg.resolve_shader(shader_id)?;
        let kind = kind_for_tag(shn_type)?;
        let mapping_type: MappingType = decode("type", tm_type)?;
        reg.texmapping_set_type(shader, NodeId(shnode_id), kind, mapping_type)
    });
}

/// Cache float pixels under `img_name` and bind them to a texture node.
///
/// `member_name` is accepted for symmetry with the other setters and unused.
///
/// # Safety
/// `img_name` must be null or a valid NUL terminated string. `img` must be
/// null or valid for reads of `width * height * depth * channels` floats.
#[no_mangle]
pub unsafe extern "C" fn shadebind_shadernode_set_member_float_img(
    client_id: u32,
    shader_id: u32,
    shnode_id: u32,
    shn_type: u32,
    _member_name: *const c_char,
    img_name: *const c_char,
    img: *const f32,
    width: u32,
    height: u32,
    depth: u32,
    channels: u32,
) {
    dispatch(client_id, "shadernode_set_member_float_img", |reg| {
        let shader = reg.resolve_shader(shader_id)?;
        let kind = kind_for_tag(shn_type)?;
        // SAFETY: forwarded from this function's contract.
        let name = unsafe { c_str(img_name, "image name") }?;
        // SAFETY: forwarded from this function's contract.
        let data = unsafe { pixels(img, [width, height, depth, channels]) }?;
        reg.set_member_image(
            shader,
            NodeId(shnode_id),
            kind,
            name,
            PixelData::Float(data),
            width,
            height,
            depth,
            channels,
        )
    });
}

/// Cache byte pixels under `img_name` and bind them to a texture node.
///
/// `member_name` is accepted for symmetry with the other setters and unused.
///
/// # Safety
/// `img_name` must be null or a valid NUL terminated string. `img` must be
/// null or valid for reads of `width * height * depth * channels` bytes.
#[no_mangle]
pub unsafe extern "C" fn shadebind_shadernode_set_member_byte_img(
    client_id: u32,
    shader_id: u32,
    shnode_id: u32,
    shn_type: u32,
    _member_name: *const c_char,
    img_name: *const c_char,
    img: *const u8,
    width: u32,
    height: u32,
    depth: u32,
    channels: u32,
) {
    dispatch(client_id, "shadernode_set_member_byte_img", |reg| {
        let shader = reg.resolve_shader(shader_id)?;
        let kind = kind_for_tag(shn_type)?;
        // SAFETY: forwarded from this function's contract.
        let name = unsafe { c_str(img_name, "image name") }?;
        // SAFETY: forwarded from this function's contract.
        let data = unsafe { pixels(img, [width, height, depth, channels]) }?;
        reg.set_member_image(
            shader,
            NodeId(shnode_id),
            kind,
            name,
            PixelData::Byte(data),
            width,
            height,
            depth,
            channels,
        )
    });
}

/// Link output socket `from` of node `from_id` to input `to` of node `to_id`.
///
/// # Safety
/// `from` and `to` must be null or valid NUL terminated strings.
#[no_mangle]
pub unsafe extern "C" fn shadebind_shader_connect_nodes(
    client_id: u32,
    shader_id: u32,
    from_id: u32,
    from: *const c_char,
    to_id: u32,
    to: *const c_char,
) {
    dispatch(client_id, "shader_connect_nodes", |reg| {
        let shader = reg.resolve_shader(shader_id)?;
        // SAFETY: forwarded from this function's contract.
        let from = unsafe { c_str(from, "output socket") }?;
        // SAFETY: forwarded from this function's contract.
        let to = unsafe { c_str(to, "input socket") }?;
        reg.connect(shader, NodeId(from_id), from, NodeId(to_id), to)
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::HostLogBridge;
    use shadebind_graph::NodeData;
    use tracing_subscriber::layer::SubscriberExt;

    static LOG_LINES: Mutex<Vec<String>> = parking_lot::const_mutex(Vec::new());

    fn tag(kind: ShaderNodeKind) -> u32 {
        kind.tag().unwrap()
    }

    fn reset() {
        shadebind_shutdown();
        shadebind_initialise(0);
    }

    fn node_data(shader_id: u32, node_id: u32) -> NodeData {
        with_runtime(|runtime| {
            let shader = runtime.registry.resolve_shader(shader_id).unwrap();
            runtime.registry.node(shader, NodeId(node_id)).unwrap().data.clone()
        })
    }

    extern "C" fn capture_line(message: *const c_char) {
        // SAFETY: the bridge always passes a live CString.
        let line = unsafe { CStr::from_ptr(message) }.to_string_lossy().into_owned();
        LOG_LINES.lock().push(line);
    }

    #[test]
    fn test_shaders_follow_defaults() {
        let _lock = crate::GLOBAL_STATE_LOCK.lock();
        reset();

        assert_eq!(shadebind_create_shader(0), 4);
        assert_eq!(shadebind_create_shader(0), 5);
        assert_eq!(
            shadebind_add_shader_node(0, 99, tag(ShaderNodeKind::Diffuse)),
            SHADEBIND_NOT_FOUND
        );
        assert_eq!(shadebind_add_shader_node(0, 4, 10_000), SHADEBIND_NOT_FOUND);
        assert_eq!(shadebind_add_shader_node(0, 4, tag(ShaderNodeKind::Diffuse)), 1);
    }

    #[test]
    fn test_connect_and_members() {
        let _lock = crate::GLOBAL_STATE_LOCK.lock();
        reset();

        let shader = shadebind_create_shader(1);
        let math_tag = tag(ShaderNodeKind::Math);
        let math = shadebind_add_shader_node(1, shader, math_tag);
        let diffuse = shadebind_add_shader_node(1, shader, tag(ShaderNodeKind::Diffuse));
        let (value, bsdf) = (c"Value".as_ptr(), c"BSDF".as_ptr());
        let (surface, volume) = (c"Surface".as_ptr(), c"Volume".as_ptr());

        // SAFETY: C string literals are NUL terminated and static.
        unsafe {
            shadebind_shadernode_set_member_bool(
                1,
                shader,
                math,
                math_tag,
                c"use_clamp".as_ptr(),
                true,
            );
            shadebind_shadernode_set_enum(
                1,
                shader,
                math,
                math_tag,
                c"type".as_ptr(),
                c"Maximum".as_ptr(),
            );
            shadebind_shader_connect_nodes(1, shader, math, value, diffuse, c"Roughness".as_ptr());
            shadebind_shader_connect_nodes(1, shader, diffuse, bsdf, 0, surface);
            // Unknown node, null socket name
            shadebind_shader_connect_nodes(1, shader, 42, bsdf, 0, volume);
            shadebind_shader_connect_nodes(1, shader, diffuse, std::ptr::null(), 0, volume);
        }

        let NodeData::Math(data) = node_data(shader, math) else {
            panic!("expected math data");
        };
        assert!(data.use_clamp);
        assert_eq!(data.math_type.to_string(), "Maximum");

        let connections = with_runtime(|runtime| {
            let handle = runtime.registry.resolve_shader(shader).unwrap();
            runtime.registry.shader(handle).unwrap().graph.connection_count()
        });
        assert_eq!(connections, 2);
    }

    #[test]
    fn test_scenes() {
        let _lock = crate::GLOBAL_STATE_LOCK.lock();
        reset();

        let shader = shadebind_create_shader(0);
        let first = shadebind_create_scene(0);
        let second = shadebind_create_scene(0);
        let third = shadebind_create_scene(0);

        assert_eq!(shadebind_scene_add_shader(0, first, shader), 0);
        assert_eq!(shadebind_scene_add_shader(0, second, 0), 0);
        assert_eq!(shadebind_scene_add_shader(0, second, shader), 1);
        assert_eq!(shadebind_scene_add_shader(0, 77, shader), SHADEBIND_NOT_FOUND);

        assert_eq!(shadebind_scene_shader_id(0, first, shader), 0);
        assert_eq!(shadebind_scene_shader_id(0, second, shader), 1);
        assert_eq!(shadebind_scene_shader_id(0, third, shader), SHADEBIND_NOT_FOUND);
        shadebind_scene_tag_shader(0, third, shader);
    }

    #[test]
    fn test_images_and_mapping() {
        let _lock = crate::GLOBAL_STATE_LOCK.lock();
        reset();

        let shader = shadebind_create_shader(0);
        let (texture_tag, mapping_tag) = (
            tag(ShaderNodeKind::ImageTexture),
            tag(ShaderNodeKind::Mapping),
        );
        let texture = shadebind_add_shader_node(0, shader, texture_tag);
        let mapping = shadebind_add_shader_node(0, shader, mapping_tag);
        let pixels = [0.25f32; 8];

        // SAFETY: `pixels` holds 2 * 1 * 1 * 4 floats; strings are literals.
        unsafe {
            for _ in 0..2 {
                shadebind_shadernode_set_member_float_img(
                    0,
                    shader,
                    texture,
                    texture_tag,
                    std::ptr::null(),
                    c"sky".as_ptr(),
                    pixels.as_ptr(),
                    2,
                    1,
                    1,
                    4,
                );
            }
            // Null buffer is rejected
            shadebind_shadernode_set_member_byte_img(
                0,
                shader,
                texture,
                texture_tag,
                std::ptr::null(),
                c"sky".as_ptr(),
                std::ptr::null(),
                2,
                1,
                1,
                4,
            );
        }
        assert_eq!(with_runtime(|runtime| runtime.registry.images().len()), 1);

        shadebind_shadernode_texmapping_set_transformation(
            0,
            shader,
            mapping,
            mapping_tag,
            1,
            0.0,
            0.0,
            2.0,
        );
        shadebind_shadernode_texmapping_set_transformation(
            0,
            shader,
            mapping,
            mapping_tag,
            7,
            9.0,
            9.0,
            9.0,
        );
        shadebind_shadernode_texmapping_set_projection(0, shader, mapping, mapping_tag, 3);

        let NodeData::Mapping(data) = node_data(shader, mapping) else {
            panic!("expected mapping data");
        };
        assert_eq!(data.rotation, [0.0, 0.0, 2.0]);
        assert_eq!(data.scale, [1.0; 3]);
        assert_eq!(data.projection, MappingProjection::Sphere);
    }

    #[test]
    fn test_host_logger_receives_client_lines() {
        let _lock = crate::GLOBAL_STATE_LOCK.lock();
        reset();
        LOG_LINES.lock().clear();
        shadebind_set_logger(9, Some(capture_line));

        let subscriber = tracing_subscriber::registry().with(HostLogBridge);
        tracing::subscriber::with_default(subscriber, || {
            shadebind_initialise(9);
            shadebind_initialise(10);
        });
        shadebind_set_logger(9, None);

        let lines = LOG_LINES.lock();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].contains("Client initialised"));
    }

    #[test]
    fn test_shutdown_forgets_host_loggers() {
        let _lock = crate::GLOBAL_STATE_LOCK.lock();
        reset();
        LOG_LINES.lock().clear();
        shadebind_set_logger(11, Some(capture_line));
        shadebind_shutdown();

        let subscriber = tracing_subscriber::registry().with(HostLogBridge);
        tracing::subscriber::with_default(subscriber, || {
            shadebind_initialise(11);
        });

        assert!(LOG_LINES.lock().is_empty());
    }
}
