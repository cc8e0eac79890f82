//! Modbus RTU framing for the 4-in-1 RS485 soil sensor.
//!
//! Only "read holding registers" (0x03) for a single register is needed.
//! The four request frames are fixed; [`ReadRequest`] rebuilds them and
//! [`decode_read_response`] checks and unpacks the sensor's reply.

use core::fmt;
use crc16::{MODBUS, State};

pub const SENSOR_ADDRESS: u8 = 0x01;
pub const READ_HOLDING_REGISTERS: u8 = 0x03;
/// Set on the function code of an exception reply.
pub const EXCEPTION_FLAG: u8 = 0x80;

pub const REQUEST_LEN: usize = 8;
/// slave, function, byte count, value hi, value lo, crc lo, crc hi
pub const SINGLE_REGISTER_RESPONSE_LEN: usize = 7;
pub const EXCEPTION_RESPONSE_LEN: usize = 5;

pub const CMD_HUMIDITY: [u8; REQUEST_LEN] = [0x01, 0x03, 0x00, 0x00, 0x00, 0x01, 0x84, 0x0A];
pub const CMD_TEMPERATURE: [u8; REQUEST_LEN] = [0x01, 0x03, 0x00, 0x01, 0x00, 0x01, 0xD5, 0xCA];
pub const CMD_CONDUCTIVITY: [u8; REQUEST_LEN] = [0x01, 0x03, 0x00, 0x02, 0x00, 0x01, 0x25, 0xCA];
pub const CMD_PH: [u8; REQUEST_LEN] = [0x01, 0x03, 0x00, 0x03, 0x00, 0x01, 0x74, 0x0A];

/// CRC-16/MODBUS. Goes on the wire low byte first.
pub fn crc16(bytes: &[u8]) -> u16 {
    State::<MODBUS>::calculate(bytes)
}

/// True when the last two bytes are the CRC of everything before them.
pub fn verify_frame(frame: &[u8]) -> bool {
    let Some(split) = frame.len().checked_sub(2) else {
        return false;
    };
    let (body, crc) = frame.split_at(split);
    crc16(body).to_le_bytes() == [crc[0], crc[1]]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoilRegister {
    Humidity = 0x0000,
    Temperature = 0x0001,
    Conductivity = 0x0002,
    Ph = 0x0003,
}

impl SoilRegister {
    pub const ALL: [SoilRegister; 4] = [
        SoilRegister::Humidity,
        SoilRegister::Temperature,
        SoilRegister::Conductivity,
        SoilRegister::Ph,
    ];

    pub const fn address(self) -> u16 {
        self as u16
    }

    pub const fn command(self) -> &'static [u8; REQUEST_LEN] {
        match self {
            SoilRegister::Humidity => &CMD_HUMIDITY,
            SoilRegister::Temperature => &CMD_TEMPERATURE,
            SoilRegister::Conductivity => &CMD_CONDUCTIVITY,
            SoilRegister::Ph => &CMD_PH,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            SoilRegister::Humidity => "humidity",
            SoilRegister::Temperature => "temperature",
            SoilRegister::Conductivity => "conductivity",
            SoilRegister::Ph => "ph",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadRequest {
    pub slave: u8,
    pub register: u16,
    pub count: u16,
}

impl ReadRequest {
    pub const fn single(slave: u8, register: u16) -> Self {
        Self {
            slave,
            register,
            count: 1,
        }
    }

    pub fn encode(&self) -> [u8; REQUEST_LEN] {
        let [reg_hi, reg_lo] = self.register.to_be_bytes();
        let [cnt_hi, cnt_lo] = self.count.to_be_bytes();
        let mut frame = [
            self.slave,
            READ_HOLDING_REGISTERS,
            reg_hi,
            reg_lo,
            cnt_hi,
            cnt_lo,
            0,
            0,
        ];
        let [crc_lo, crc_hi] = crc16(&frame[..6]).to_le_bytes();
        frame[6] = crc_lo;
        frame[7] = crc_hi;
        frame
    }
}

impl From<SoilRegister> for ReadRequest {
    fn from(register: SoilRegister) -> Self {
        ReadRequest::single(SENSOR_ADDRESS, register.address())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModbusError {
    /// Fewer bytes than the smallest valid reply.
    Truncated(usize),
    BadCrc { expected: u16, received: u16 },
    WrongSlave(u8),
    UnexpectedFunction(u8),
    /// Byte count field other than 2.
    BadByteCount(u8),
    /// The device answered with an exception code.
    Exception(u8),
}

impl fmt::Display for ModbusError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModbusError::Truncated(len) => write!(f, "frame truncated ({len} bytes)"),
            ModbusError::BadCrc { expected, received } => {
                write!(f, "CRC mismatch: expected 0x{expected:04X}, got 0x{received:04X}")
            }
            ModbusError::WrongSlave(addr) => write!(f, "reply from unexpected slave {addr}"),
            ModbusError::UnexpectedFunction(code) => {
                write!(f, "unexpected function code 0x{code:02X}")
            }
            ModbusError::BadByteCount(n) => write!(f, "byte count {n}, expected 2"),
            ModbusError::Exception(code) => write!(f, "device exception 0x{code:02X}"),
        }
    }
}

fn check_crc(frame: &[u8]) -> Result<(), ModbusError> {
    let (body, tail) = frame.split_at(frame.len() - 2);
    let expected = crc16(body);
    let received = u16::from_le_bytes([tail[0], tail[1]]);
    if expected != received {
        return Err(ModbusError::BadCrc { expected, received });
    }
    Ok(())
}

/// Decodes the reply to a single-register read and returns the raw value.
///
/// Exception replies (any function with 0x80 set) are recognised at their own, shorter
/// length so the exception code is reported rather than a truncation.
pub fn decode_read_response(frame: &[u8], slave: u8) -> Result<u16, ModbusError> {
    if frame.len() < EXCEPTION_RESPONSE_LEN {
        return Err(ModbusError::Truncated(frame.len()));
    }

    if frame[1] & EXCEPTION_FLAG != 0 {
        let frame = &frame[..EXCEPTION_RESPONSE_LEN];
        check_crc(frame)?;
        if frame[0] != slave {
            return Err(ModbusError::WrongSlave(frame[0]));
        }
        if frame[1] != READ_HOLDING_REGISTERS | EXCEPTION_FLAG {
            return Err(ModbusError::UnexpectedFunction(frame[1]));
        }
        return Err(ModbusError::Exception(frame[2]));
    }

    if frame.len() < SINGLE_REGISTER_RESPONSE_LEN {
        return Err(ModbusError::Truncated(frame.len()));
    }
    let frame = &frame[..SINGLE_REGISTER_RESPONSE_LEN];
    check_crc(frame)?;

    if frame[0] != slave {
        return Err(ModbusError::WrongSlave(frame[0]));
    }
    if frame[1] != READ_HOLDING_REGISTERS {
        return Err(ModbusError::UnexpectedFunction(frame[1]));
    }
    if frame[2] != 2 {
        return Err(ModbusError::BadByteCount(frame[2]));
    }
    Ok(u16::from_be_bytes([frame[3], frame[4]]))
}
