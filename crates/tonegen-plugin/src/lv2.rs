//! LV2 C entry points.
//!
//! This is the only module that touches raw pointers. Everything the host
//! hands over is validated here and passed on as safe Rust values to
//! [`GeneratorInstance`] and [`SharedSnapshot`].
//!
//! # Threading
//!
//! The host calls `run`, `connect_port` and `activate` from the audio thread
//! and the inline display's `render` from a GUI thread, possibly at the same
//! time. `Lv2Instance` keeps the state of the two sides in disjoint fields
//! and each entry point borrows only the fields it owns, so no reference ever
//! spans both threads:
//!
//! | Field        | Audio thread | Render thread |
//! |--------------|--------------|---------------|
//! | `generator`  | `&mut`       | -             |
//! | `ports`      | `&mut`       | -             |
//! | `snapshot`   | `&` (atomics)| `&` (atomics) |
//! | `canvas`     | -            | `&` (mutex)   |
//! | `capability` | `&`          | -             |

#![allow(unsafe_code)]

use std::ffi::{CStr, c_char, c_void};
use std::ptr;

use parking_lot::Mutex;
use tonegen_core::Surface;

pub use lv2_sys::{LV2_Descriptor, LV2_Feature, LV2_Handle};

use crate::error::{PluginError, Result};
use crate::instance::GeneratorInstance;
use crate::ports::PortIndex;
use crate::shared::SharedSnapshot;

/// URI of the inline display interface returned by `extension_data`.
pub const INLINE_DISPLAY_INTERFACE_URI: &CStr =
    c"http://harrisonconsoles.com/lv2/inlinedisplay#interface";

/// URI of the host feature used to request a redraw.
pub const INLINE_DISPLAY_QUEUE_DRAW_URI: &CStr =
    c"http://harrisonconsoles.com/lv2/inlinedisplay#queue_draw";

// Ardour's inline display extension has no binding crate; these mirror
// `ardour/lv2_extensions.h`.

/// Image handed to the host by the inline display `render` call.
#[repr(C)]
#[derive(Debug)]
pub struct Lv2InlineDisplayImageSurface {
    /// ARGB32 pixel data.
    pub data: *mut u8,
    /// Width in pixels.
    pub width: i32,
    /// Height in pixels.
    pub height: i32,
    /// Row stride in bytes.
    pub stride: i32,
}

/// Inline display interface returned by `extension_data`.
#[repr(C)]
pub struct Lv2InlineDisplayInterface {
    /// Draw a preview at most `max_height` pixels tall.
    pub render: Option<
        unsafe extern "C" fn(
            instance: LV2_Handle,
            width: u32,
            max_height: u32,
        ) -> *mut Lv2InlineDisplayImageSurface,
    >,
}

/// Data of the `queue_draw` host feature.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct Lv2InlineDisplay {
    /// Host handle passed back to `queue_draw`.
    pub handle: *mut c_void,
    /// Ask the host to call `render` soon. Realtime safe.
    pub queue_draw: Option<unsafe extern "C" fn(handle: *mut c_void)>,
}

/// Whether the host supports inline display redraw requests.
#[derive(Debug, Clone, Copy)]
pub enum DisplayCapability {
    /// The host did not offer the feature.
    Absent,
    /// The host's `queue_draw` callback.
    Present(QueueDraw),
}

/// A validated `queue_draw` callback.
#[derive(Debug, Clone, Copy)]
pub struct QueueDraw {
    handle: *mut c_void,
    callback: unsafe extern "C" fn(handle: *mut c_void),
}

impl DisplayCapability {
    /// Scan a null-terminated host feature array for `queue_draw`.
    ///
    /// # Safety
    ///
    /// `features` must be null or point to a null-terminated array of valid
    /// feature pointers whose URIs are null or NUL-terminated strings.
    unsafe fn from_features(features: *const *const LV2_Feature) -> Self {
        if features.is_null() {
            return DisplayCapability::Absent;
        }
        let mut cursor = features;
        loop {
            // SAFETY: the array is null-terminated; `cursor` has not passed the terminator.
            let feature = unsafe { *cursor };
            // SAFETY: non-null entries point to valid features.
            let Some(feature) = (unsafe { feature.as_ref() }) else {
                return DisplayCapability::Absent;
            };
            if !feature.URI.is_null()
                // SAFETY: feature URIs are NUL-terminated.
                && unsafe { CStr::from_ptr(feature.URI) } == INLINE_DISPLAY_QUEUE_DRAW_URI
            {
                // SAFETY: the queue_draw feature's data is an `LV2_Inline_Display`.
                let display = unsafe { feature.data.cast::<Lv2InlineDisplay>().as_ref() };
                return match display {
                    Some(&Lv2InlineDisplay {
                        handle,
                        queue_draw: Some(callback),
                    }) => DisplayCapability::Present(QueueDraw { handle, callback }),
                    _ => DisplayCapability::Absent,
                };
            }
            // SAFETY: the current entry is not the terminator.
            cursor = unsafe { cursor.add(1) };
        }
    }

    /// Whether redraw requests can be sent.
    pub fn is_present(&self) -> bool {
        matches!(self, DisplayCapability::Present(_))
    }

    /// Ask the host to redraw, if it supports that.
    fn queue_draw(&self) {
        if let DisplayCapability::Present(q) = self {
            // SAFETY: the host keeps the feature valid for the instance's
            // lifetime, and queue_draw may be called from `run`.
            unsafe { (q.callback)(q.handle) }
        }
    }
}

/// Host buffers bound with `connect_port`.
#[derive(Debug)]
struct PortBuffers {
    frequency: *const f32,
    amplitude: *const f32,
    output: *mut f32,
}

impl Default for PortBuffers {
    fn default() -> Self {
        Self {
            frequency: ptr::null(),
            amplitude: ptr::null(),
            output: ptr::null_mut(),
        }
    }
}

/// Image kept alive between `render` calls.
struct Canvas {
    surface: Surface,
    image: Lv2InlineDisplayImageSurface,
}

/// Everything behind an [`LV2_Handle`].
struct Lv2Instance {
    generator: GeneratorInstance,
    ports: PortBuffers,
    snapshot: SharedSnapshot,
    canvas: Mutex<Canvas>,
    capability: DisplayCapability,
}

impl Lv2Instance {
    /// # Safety
    ///
    /// Arguments as passed to `instantiate` by a conforming host.
    unsafe fn new(
        descriptor: *const LV2_Descriptor,
        sample_rate: f64,
        features: *const *const LV2_Feature,
    ) -> Result<Self> {
        // SAFETY: the host passes the descriptor it got from `lv2_descriptor`, or null.
        let uri = unsafe { descriptor.as_ref() }
            .map(|d| d.URI)
            .filter(|uri| !uri.is_null())
            .ok_or(PluginError::NullDescriptor)?;
        // SAFETY: descriptor URIs are NUL-terminated.
        let uri = unsafe { CStr::from_ptr(uri) }.to_str()?;

        let generator = GeneratorInstance::new(uri, sample_rate)?;
        // SAFETY: forwarded from the host.
        let capability = unsafe { DisplayCapability::from_features(features) };
        tracing::info!(
            uri,
            sample_rate,
            inline_display = capability.is_present(),
            "instantiated"
        );

        Ok(Self {
            snapshot: SharedSnapshot::new(&generator.initial_snapshot()),
            generator,
            ports: PortBuffers::default(),
            canvas: Mutex::new(Canvas {
                surface: Surface::new(),
                image: Lv2InlineDisplayImageSurface {
                    data: ptr::null_mut(),
                    width: 0,
                    height: 0,
                    stride: 0,
                },
            }),
            capability,
        })
    }
}

unsafe extern "C" fn instantiate(
    descriptor: *const LV2_Descriptor,
    sample_rate: f64,
    _bundle_path: *const c_char,
    features: *const *const LV2_Feature,
) -> LV2_Handle {
    // SAFETY: arguments come straight from the host.
    match unsafe { Lv2Instance::new(descriptor, sample_rate, features) } {
        Ok(instance) => Box::into_raw(Box::new(instance)).cast(),
        Err(err) => {
            tracing::error!(%err, "failed to instantiate generator");
            ptr::null_mut()
        }
    }
}

unsafe extern "C" fn connect_port(handle: LV2_Handle, port: u32, data: *mut c_void) {
    let instance = handle.cast::<Lv2Instance>();
    if instance.is_null() {
        return;
    }
    // SAFETY: audio-thread call; only the audio side's `ports` is borrowed.
    let ports = unsafe { &mut *(&raw mut (*instance).ports) };
    match PortIndex::try_from(port) {
        Ok(PortIndex::Frequency) => ports.frequency = data.cast(),
        Ok(PortIndex::Amplitude) => ports.amplitude = data.cast(),
        Ok(PortIndex::Output) => ports.output = data.cast(),
        Err(_) => {}
    }
}

unsafe extern "C" fn activate(handle: LV2_Handle) {
    let instance = handle.cast::<Lv2Instance>();
    if instance.is_null() {
        return;
    }
    // SAFETY: never concurrent with `run`; only `generator` is borrowed.
    let generator = unsafe { &mut *(&raw mut (*instance).generator) };
    generator.activate();
    tracing::debug!(id = generator.descriptor().id, "activated");
}

unsafe extern "C" fn run(handle: LV2_Handle, sample_count: u32) {
    let instance = handle.cast::<Lv2Instance>();
    if instance.is_null() {
        return;
    }
    // SAFETY: audio-thread call. The render thread only touches `snapshot`
    // (atomics) and `canvas`, neither of which is borrowed mutably here.
    let (generator, ports, snapshot, capability) = unsafe {
        (
            &mut *(&raw mut (*instance).generator),
            &*(&raw const (*instance).ports),
            &*(&raw const (*instance).snapshot),
            &*(&raw const (*instance).capability),
        )
    };

    // SAFETY: bound control ports point to a single f32 valid during `run`.
    let frequency = unsafe { ports.frequency.as_ref() }.copied();
    // SAFETY: as above.
    let amplitude = unsafe { ports.amplitude.as_ref() }.copied();
    let output = if ports.output.is_null() {
        None
    } else {
        // SAFETY: the output port holds at least `sample_count` samples.
        Some(unsafe { std::slice::from_raw_parts_mut(ports.output, sample_count as usize) })
    };

    if generator.process(frequency, amplitude, output) {
        snapshot.publish(&generator.snapshot());
        capability.queue_draw();
    }
}

unsafe extern "C" fn deactivate(_handle: LV2_Handle) {}

unsafe extern "C" fn cleanup(handle: LV2_Handle) {
    if handle.is_null() {
        return;
    }
    // SAFETY: `handle` came from `Box::into_raw` in `instantiate` and the
    // host calls `cleanup` once, after every other call has returned.
    let instance = unsafe { Box::from_raw(handle.cast::<Lv2Instance>()) };
    tracing::debug!(id = instance.generator.descriptor().id, "cleaned up");
}

unsafe extern "C" fn extension_data(uri: *const c_char) -> *const c_void {
    if uri.is_null() {
        return ptr::null();
    }
    // SAFETY: extension URIs are NUL-terminated.
    if unsafe { CStr::from_ptr(uri) } == INLINE_DISPLAY_INTERFACE_URI {
        ptr::from_ref(&DISPLAY_INTERFACE).cast()
    } else {
        ptr::null()
    }
}

unsafe extern "C" fn render_inline(
    handle: LV2_Handle,
    width: u32,
    max_height: u32,
) -> *mut Lv2InlineDisplayImageSurface {
    let instance = handle.cast::<Lv2Instance>();
    if instance.is_null() {
        return ptr::null_mut();
    }
    // SAFETY: render-thread call; `snapshot` is atomics and `canvas` is
    // behind a mutex, so both may be shared with the audio thread.
    let (snapshot, canvas) = unsafe {
        (
            &*(&raw const (*instance).snapshot),
            &*(&raw const (*instance).canvas),
        )
    };

    let mut guard = canvas.lock();
    let canvas = &mut *guard;
    snapshot.render(width, max_height, &mut canvas.surface);
    canvas.image = Lv2InlineDisplayImageSurface {
        data: canvas.surface.data_ptr(),
        width: canvas.surface.width() as i32,
        height: canvas.surface.height() as i32,
        stride: canvas.surface.stride() as i32,
    };
    // Valid until the next render or cleanup.
    &raw mut canvas.image
}

static DISPLAY_INTERFACE: Lv2InlineDisplayInterface = Lv2InlineDisplayInterface {
    render: Some(render_inline),
};

const fn descriptor(uri: &'static CStr) -> LV2_Descriptor {
    LV2_Descriptor {
        URI: uri.as_ptr(),
        instantiate: Some(instantiate),
        connect_port: Some(connect_port),
        activate: Some(activate),
        run: Some(run),
        deactivate: Some(deactivate),
        cleanup: Some(cleanup),
        extension_data: Some(extension_data),
    }
}

const SINGEN: LV2_Descriptor = descriptor(c"urn:ardour:singen");
const SQUARGEN: LV2_Descriptor = descriptor(c"urn:ardour:squargen");

/// LV2 discovery entry point.
///
/// Returns the descriptor at `index` (0 = sine, 1 = square) or null past the
/// end of the table.
#[unsafe(no_mangle)]
pub extern "C" fn lv2_descriptor(index: u32) -> *const LV2_Descriptor {
    match index {
        0 => &SINGEN,
        1 => &SQUARGEN,
        _ => ptr::null(),
    }
}
