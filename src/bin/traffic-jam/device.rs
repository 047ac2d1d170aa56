//! Hardware binding through midir
//!
//! The controller is found by a substring of its port names. Input arrives on
//! midir's callback thread and is handed to the surface through an rtrb queue.

use color_eyre::eyre::{eyre, Result, WrapErr};
use midir::{Ignore, MidiIO, MidiInput, MidiInputConnection, MidiOutput, MidiOutputConnection};
use rtrb::Producer;
use tracing::{debug, info, warn};

use traffic_jam::io::converter::bytes_to_input;
use traffic_jam::io::{DeviceSink, InputEvent, MidiEvent};

const CLIENT_NAME: &str = "traffic-jam";

/// An open output port used as a render sink
pub struct PortSink {
    name: String,
    connection: Option<MidiOutputConnection>,
}

impl PortSink {
    fn new(name: String, connection: MidiOutputConnection) -> Self {
        Self {
            name,
            connection: Some(connection),
        }
    }
}

impl DeviceSink for PortSink {
    fn send(&mut self, event: MidiEvent) {
        let Some(connection) = self.connection.as_mut() else {
            return;
        };
        if let Err(err) = connection.send(&event.to_bytes()) {
            warn!(port = %self.name, %err, "Failed to send MIDI message");
        }
    }

    fn close(&mut self) {
        if let Some(connection) = self.connection.take() {
            connection.close();
            debug!(port = %self.name, "Closed output port");
        }
    }
}

fn find_port<T: MidiIO>(io: &T, needle: &str) -> Option<(T::Port, String)> {
    io.ports().into_iter().find_map(|port| {
        let name = io.port_name(&port).ok()?;
        name.contains(needle).then_some((port, name))
    })
}

/// Open the controller's output port
pub fn open_device(needle: &str) -> Result<PortSink> {
    let output = MidiOutput::new(CLIENT_NAME).wrap_err("Failed to create MIDI output client")?;
    let (port, name) = find_port(&output, needle)
        .ok_or_else(|| eyre!("No '{needle}' controller output found, is it plugged in?"))?;
    let connection = output
        .connect(&port, "device")
        .map_err(|err| eyre!("Failed to connect to '{name}': {err}"))?;

    info!(port = %name, "Connected device output");
    Ok(PortSink::new(name, connection))
}

/// Create the relay port downstream software listens on
#[cfg(unix)]
pub fn open_relay(name: &str) -> Result<PortSink> {
    use midir::os::unix::VirtualOutput;

    let output = MidiOutput::new(CLIENT_NAME).wrap_err("Failed to create MIDI output client")?;
    let connection = output
        .create_virtual(name)
        .map_err(|err| eyre!("Failed to create relay port '{name}': {err}"))?;

    info!(port = %name, "Created virtual relay port");
    Ok(PortSink::new(name.to_string(), connection))
}

/// Connect to the relay port downstream software listens on.
///
/// Virtual ports are unavailable here, so the port (e.g. a loopMIDI port)
/// must already exist.
#[cfg(not(unix))]
pub fn open_relay(name: &str) -> Result<PortSink> {
    let output = MidiOutput::new(CLIENT_NAME).wrap_err("Failed to create MIDI output client")?;
    let (port, port_name) =
        find_port(&output, name).ok_or_else(|| eyre!("No relay port named '{name}' found"))?;
    let connection = output
        .connect(&port, "relay")
        .map_err(|err| eyre!("Failed to connect to '{port_name}': {err}"))?;

    info!(port = %port_name, "Connected relay output");
    Ok(PortSink::new(port_name, connection))
}

/// Start forwarding controller input into `queue`.
///
/// The returned connection must be kept alive for input to keep flowing.
pub fn listen(needle: &str, queue: Producer<InputEvent>) -> Result<MidiInputConnection<Producer<InputEvent>>> {
    let mut input = MidiInput::new(CLIENT_NAME).wrap_err("Failed to create MIDI input client")?;
    input.ignore(Ignore::All);

    let (port, name) = find_port(&input, needle)
        .ok_or_else(|| eyre!("No '{needle}' controller input found, is it plugged in?"))?;

    let connection = input
        .connect(
            &port,
            "device",
            |_stamp, bytes, queue| {
                let Some(event) = bytes_to_input(bytes) else {
                    return;
                };
                if queue.push(event).is_err() {
                    warn!(?event, "Input queue full, dropping event");
                }
            },
            queue,
        )
        .map_err(|err| eyre!("Failed to connect to '{name}': {err}"))?;

    info!(port = %name, "Connected device input");
    Ok(connection)
}
