use anyhow::Result;
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{Sample, SampleFormat, Stream};
use std::sync::{Arc, RwLock};

use crate::core::Engine;

/// Handle to the running audio output. Created lazily on the first
/// trigger and kept for the rest of the session; never rebuilt.
pub struct AudioOutput {
    pub sample_rate: f32,
    pub device_name: String,
    _stream: Stream,
}

impl AudioOutput {
    /// Open the output device and start the stream. The engine's sample
    /// rate is set from the device config before any voice can play.
    pub fn start(engine: Arc<RwLock<Engine>>, preferred_device: Option<&str>) -> Result<Self> {
        let host = cpal::default_host();
        println!("[AUDIO] Using audio host: {}", host.id().name());

        let device = pick_device(&host, preferred_device)
            .ok_or_else(|| anyhow::anyhow!("No output device available"))?;
        let device_name = device.name().unwrap_or_else(|_| "unknown".to_string());
        println!("[AUDIO] Using output device: {}", device_name);

        let config = device.default_output_config()?;
        let sample_format = config.sample_format();
        let config = cpal::StreamConfig::from(config);
        let sample_rate = config.sample_rate.0 as f32;
        println!("[AUDIO] Using sample rate: {}", sample_rate);

        if let Ok(mut engine) = engine.write() {
            engine.sample_rate = sample_rate;
        }

        let stream = match sample_format {
            SampleFormat::F32 => create_stream::<f32>(&device, &config, Arc::clone(&engine)),
            SampleFormat::I16 => create_stream::<i16>(&device, &config, Arc::clone(&engine)),
            SampleFormat::U16 => create_stream::<u16>(&device, &config, Arc::clone(&engine)),
            _ => anyhow::bail!("Unsupported sample format"),
        }?;

        stream.play()?;
        println!("[AUDIO] Audio stream started");

        Ok(AudioOutput {
            sample_rate,
            device_name,
            _stream: stream,
        })
    }
}

fn pick_device(host: &cpal::Host, preferred: Option<&str>) -> Option<cpal::Device> {
    if let Some(name) = preferred {
        if let Ok(mut devices) = host.output_devices() {
            if let Some(device) =
                devices.find(|d| d.name().map(|n| n == name).unwrap_or(false))
            {
                return Some(device);
            }
        }
        println!("[AUDIO] Preferred device '{}' not found, falling back to default", name);
    }
    host.default_output_device()
}

/// List the names of the available output devices for the settings tab.
pub fn output_device_names() -> Vec<String> {
    let host = cpal::default_host();
    let mut names = Vec::new();
    if let Ok(devices) = host.output_devices() {
        for device in devices {
            if let Ok(name) = device.name() {
                names.push(name);
            }
        }
    }
    names
}

fn create_stream<T>(
    device: &cpal::Device,
    config: &cpal::StreamConfig,
    engine: Arc<RwLock<Engine>>,
) -> Result<Stream>
where
    T: Sample + Send + 'static + cpal::SizedSample + cpal::FromSample<f32>,
{
    let config = config.clone();
    let channels = config.channels as usize;
    let err_fn = |err| eprintln!("an error occurred on the audio stream: {}", err);

    let stream = device.build_output_stream(
        &config,
        move |data: &mut [T], _: &cpal::OutputCallbackInfo| {
            // Mix one sample per frame and fan it out to all channels.
            for frame in data.chunks_mut(channels) {
                let value = match engine.write() {
                    Ok(mut guard) => guard.get_sample(),
                    Err(_) => 0.0,
                };

                let value_t = T::from_sample(value);

                for sample in frame.iter_mut() {
                    *sample = value_t;
                }
            }
        },
        err_fn,
        None,
    )?;

    Ok(stream)
}
